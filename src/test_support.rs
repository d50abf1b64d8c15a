use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Write `contents` to `dir/name`, creating parent directories.
pub(crate) fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Write a `/bin/sh` script. Tests run it as `sh <path> ...` so the
/// executable bit is not needed.
pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    write_file(dir, name, &format!("#!/bin/sh\n{}", body))
}

pub(crate) const GANT_TEST_DIR: &str = "src/test/groovy/org/codehaus/gant/ant/tests";

/// Stand-in for `ant -f <file>` that reports a Gantfile compile failure,
/// writes a line to stderr, and exits 1.
pub(crate) const FAILING_ANT_SCRIPT: &str = r#"[ "$1" = "-f" ] || { echo "usage: ant -f <file>" >&2; exit 2; }
echo "Buildfile: $2"
echo
echo "-initializeWithGroovyHome:"
echo
echo "-initializeNoGroovyHome:"
echo
echo "gantTestDefaultTarget:"
echo "     [gant] Error evaluating Gantfile: startup failed, build_gant: 15: unable to resolve class org.codehaus.gant.ant.tests.Gant_Test"
echo "     [gant]  @ line 15, column 1."
echo "     [gant] 1 error"
echo "     [gant] "
echo "BUILD FAILED" >&2
exit 1
"#;

/// Transcript [`FAILING_ANT_SCRIPT`] prints for `ant -f GANT_TEST_DIR/gantTest.xml`.
pub(crate) fn failing_ant_transcript() -> String {
    format!(
        "Buildfile: {}/gantTest.xml\n\n-initializeWithGroovyHome:\n\n-initializeNoGroovyHome:\n\ngantTestDefaultTarget:\n     [gant] Error evaluating Gantfile: startup failed, build_gant: 15: unable to resolve class org.codehaus.gant.ant.tests.Gant_Test\n     [gant]  @ line 15, column 1.\n     [gant] 1 error\n     [gant] \n",
        GANT_TEST_DIR
    )
}

/// Stand-in for `gant -f <file> [target]`: checks the file exists, then
/// prints the message for the requested target (the default when omitted).
pub(crate) const FAKE_GANT_SCRIPT: &str = r#"[ "$1" = "-f" ] || { echo "usage: gant -f <file> [target]" >&2; exit 2; }
[ -f "$2" ] || { echo "Cannot open file $2" >&2; exit 253; }
case "${3:-default}" in
  default) echo "A test target in the default file." ;;
  gantTestNamedTarget) echo "Another target in the default file." ;;
  *) echo "Target $3 does not exist." >&2; exit 255 ;;
esac
"#;

/// Project file mirroring the targets of the Gant Ant task test build.
pub(crate) const GANT_TEST_PROJECT: &str = r#"
name: Gant Ant Task Test
default: gantTestDefaultTarget
targets:
  gantTestDefaultTarget:
    description: Run the default target of the default Gantfile.
    tasks:
      - gant: {}
  gantTestNamedTarget:
    tasks:
      - gant:
          target: gantTestNamedTarget
  missingGantfile:
    tasks:
      - gant:
          file: blahblah.gant
  gantTaskdef:
    tasks:
      - echo:
          message: "OK."
"#;

/// Lay out a project directory with the fake gant tool, a `build.gant`, and
/// [`GANT_TEST_PROJECT`]. Returns the project file path and the gant
/// command template to use.
pub(crate) fn write_gant_project(dir: &Path) -> (PathBuf, String) {
    let gant = write_script(dir, "bin/gant", FAKE_GANT_SCRIPT);
    write_file(dir, "build.gant", "target(default: 'A test target') { }\n");
    let project = write_file(dir, "build.yaml", GANT_TEST_PROJECT);
    let command = format!(
        "sh {} -f {{gantfile}} {{target}}",
        shell_words::quote(&gant.to_string_lossy())
    );
    (project, command)
}
