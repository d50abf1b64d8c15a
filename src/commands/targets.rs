//! Implementation of the `antrun targets` command.

use super::exec::project_path;
use super::load_config;
use crate::cli::TargetsArgs;
use crate::error::Result;
use crate::exit_codes;
use crate::project::Project;

/// Execute the `antrun targets` command.
pub fn cmd_targets(args: TargetsArgs) -> Result<i32> {
    let config = load_config()?;
    let project = Project::load(project_path(args.file.as_ref(), &config))?;
    print!("{}", format_targets(&project));
    Ok(exit_codes::SUCCESS)
}

/// One line per target, sorted by name. The default target is marked `*`.
fn format_targets(project: &Project) -> String {
    let width = project
        .targets()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    let mut out = format!("Project: {}\n", project.name());
    for (name, target) in project.targets() {
        let marker = if project.default_target() == Some(name) {
            '*'
        } else {
            ' '
        };
        match target.description.as_deref() {
            Some(description) => {
                out.push_str(&format!("{} {:width$}  {}\n", marker, name, description))
            }
            None => out.push_str(&format!("{} {}\n", marker, name)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::GANT_TEST_PROJECT;

    #[test]
    fn test_format_targets_marks_default() {
        let project = Project::from_yaml(GANT_TEST_PROJECT, ".").unwrap();

        let listing = format_targets(&project);

        assert_eq!(
            listing,
            concat!(
                "Project: Gant Ant Task Test\n",
                "  gantTaskdef\n",
                "* gantTestDefaultTarget  Run the default target of the default Gantfile.\n",
                "  gantTestNamedTarget\n",
                "  missingGantfile\n",
            )
        );
    }

    #[test]
    fn test_format_targets_without_default() {
        let project = Project::from_yaml(
            "name: tiny\ntargets:\n  only:\n    description: The only one.\n",
            ".",
        )
        .unwrap();

        assert_eq!(format_targets(&project), "Project: tiny\n  only  The only one.\n");
    }
}
