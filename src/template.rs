//! `{variable}` substitution for command templates.
//!
//! Command templates such as `gant -f {gantfile} {target}` are split into
//! words with shell-words rules first and rendered word by word, so a value
//! containing spaces or quotes stays a single argument.
//!
//! # Syntax
//!
//! - `{name}` - Substitutes the value of variable `name`
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`
//!
//! Undefined variables are an error rather than an empty substitution.

use std::collections::HashMap;
use thiserror::Error;

/// Error type for template rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("undefined variable '{name}' at position {position} in template")]
    UndefinedVariable { name: String, position: usize },

    #[error("unmatched '{{' at position {position} in template")]
    UnmatchedBrace { position: usize },

    #[error("empty variable name '{{}}' at position {position} in template")]
    EmptyVariableName { position: usize },

    #[error("failed to split command template: {0}")]
    Split(String),

    #[error("command template is empty")]
    Empty,
}

/// Render a single string by substituting `{name}` placeholders.
pub fn render(template: &str, variables: &HashMap<String, String>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(idx) = rest.find(['{', '}']) {
        out.push_str(&rest[..idx]);
        let position = offset + idx;
        let tail = &rest[idx..];

        let consumed = if tail.starts_with("{{") {
            out.push('{');
            2
        } else if tail.starts_with("}}") {
            out.push('}');
            2
        } else if tail.starts_with('}') {
            // A lone closing brace is literal text.
            out.push('}');
            1
        } else {
            let close = tail
                .find('}')
                .ok_or(TemplateError::UnmatchedBrace { position })?;
            let name = tail[1..close].trim();
            if name.is_empty() {
                return Err(TemplateError::EmptyVariableName { position });
            }
            let value = variables
                .get(name)
                .ok_or_else(|| TemplateError::UndefinedVariable {
                    name: name.to_string(),
                    position,
                })?;
            out.push_str(value);
            close + 1
        };

        rest = &tail[consumed..];
        offset = position + consumed;
    }

    out.push_str(rest);
    Ok(out)
}

/// Split a command template into words and render each one.
///
/// A word that is nothing but a single placeholder and renders to an empty
/// string is dropped, so optional values such as `{target}` do not turn
/// into empty arguments.
pub fn render_command(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<Vec<String>, TemplateError> {
    let words = shell_words::split(template).map_err(|e| TemplateError::Split(e.to_string()))?;

    let mut argv = Vec::with_capacity(words.len());
    for word in &words {
        let rendered = render(word, variables)?;
        if rendered.is_empty() && is_lone_placeholder(word) {
            continue;
        }
        argv.push(rendered);
    }

    if argv.is_empty() {
        return Err(TemplateError::Empty);
    }
    Ok(argv)
}

fn is_lone_placeholder(word: &str) -> bool {
    word.len() > 2
        && word.starts_with('{')
        && word.ends_with('}')
        && !word.starts_with("{{")
        && word[1..word.len() - 1].chars().all(|c| c != '{' && c != '}')
}

/// Helper to create a variables map from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_substitution() {
        let vars = vars([("gantfile", "build.gant"), ("target", "clean")]);
        let result = render("-f {gantfile} {target}", &vars).unwrap();
        assert_eq!(result, "-f build.gant clean");
    }

    #[test]
    fn test_no_variables() {
        let result = render("just text", &HashMap::new()).unwrap();
        assert_eq!(result, "just text");
    }

    #[test]
    fn test_escaped_braces() {
        let result = render("{{literal}} and a }} b", &HashMap::new()).unwrap();
        assert_eq!(result, "{literal} and a } b");
    }

    #[test]
    fn test_lone_closing_brace_is_literal() {
        let result = render("a } b", &HashMap::new()).unwrap();
        assert_eq!(result, "a } b");
    }

    #[test]
    fn test_whitespace_in_variable_name() {
        let vars = vars([("target", "dist")]);
        assert_eq!(render("{ target }", &vars).unwrap(), "dist");
    }

    #[test]
    fn test_undefined_variable_reports_position() {
        let err = render("gant {target}", &HashMap::new()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UndefinedVariable {
                name: "target".to_string(),
                position: 5,
            }
        );
    }

    #[test]
    fn test_unmatched_brace() {
        let err = render("gant {target", &HashMap::new()).unwrap_err();
        assert_eq!(err, TemplateError::UnmatchedBrace { position: 5 });
    }

    #[test]
    fn test_empty_variable_name() {
        let err = render("x {} y", &HashMap::new()).unwrap_err();
        assert_eq!(err, TemplateError::EmptyVariableName { position: 2 });
    }

    #[test]
    fn test_positions_after_escapes() {
        let err = render("{{}} {missing}", &HashMap::new()).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::UndefinedVariable { position: 5, .. }
        ));
    }

    #[test]
    fn test_render_command_keeps_spaces_in_values() {
        let vars = vars([("gantfile", "/tmp/my project/build.gant"), ("target", "t")]);
        let argv = render_command("gant -f {gantfile} {target}", &vars).unwrap();
        assert_eq!(argv, ["gant", "-f", "/tmp/my project/build.gant", "t"]);
    }

    #[test]
    fn test_render_command_drops_empty_lone_placeholder() {
        let vars = vars([("gantfile", "build.gant"), ("target", "")]);
        let argv = render_command("gant -f {gantfile} {target}", &vars).unwrap();
        assert_eq!(argv, ["gant", "-f", "build.gant"]);
    }

    #[test]
    fn test_render_command_keeps_empty_mixed_word() {
        let vars = vars([("target", "")]);
        let argv = render_command("gant --target={target}", &vars).unwrap();
        assert_eq!(argv, ["gant", "--target="]);
    }

    #[test]
    fn test_render_command_quoted_words() {
        let vars = vars([("x", "1")]);
        let argv = render_command("sh -c 'echo {x}'", &vars).unwrap();
        assert_eq!(argv, ["sh", "-c", "echo 1"]);
    }

    #[test]
    fn test_render_command_split_error() {
        let err = render_command("gant \"unterminated", &HashMap::new()).unwrap_err();
        assert!(matches!(err, TemplateError::Split(_)));
    }

    #[test]
    fn test_render_command_empty() {
        assert_eq!(
            render_command("   ", &HashMap::new()).unwrap_err(),
            TemplateError::Empty
        );
        let vars = vars([("cmd", "")]);
        assert_eq!(
            render_command("{cmd}", &vars).unwrap_err(),
            TemplateError::Empty
        );
    }

    #[test]
    fn test_error_display() {
        let err = TemplateError::UnmatchedBrace { position: 3 };
        assert_eq!(err.to_string(), "unmatched '{' at position 3 in template");
        let err = TemplateError::EmptyVariableName { position: 0 };
        assert_eq!(
            err.to_string(),
            "empty variable name '{}' at position 0 in template"
        );
    }
}
