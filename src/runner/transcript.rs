//! Comparing captured transcripts against expected text.
//!
//! Build tools print volatile details (elapsed time, absolute paths) that
//! have to be removed before an exact comparison is meaningful.

use regex::Regex;

/// Ant's closing `Total time: 3 seconds` line.
pub const TOTAL_TIME_PATTERN: &str = r"Total time: [0-9]*.*";

/// Removes the first match of each configured pattern from a transcript.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    patterns: Vec<Regex>,
}

impl Normalizer {
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Apply each pattern once, in order.
    pub fn apply(&self, text: &str) -> String {
        self.patterns
            .iter()
            .fold(text.to_string(), |acc, re| re.replace(&acc, "").into_owned())
    }
}

/// First line at which two transcripts differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMismatch {
    /// 1-based line number.
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl std::fmt::Display for LineMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |s: &Option<String>| match s {
            Some(s) => format!("{:?}", s),
            None => "<end of transcript>".to_string(),
        };
        write!(
            f,
            "line {}: expected {}, got {}",
            self.line,
            show(&self.expected),
            show(&self.actual)
        )
    }
}

/// Locate the first differing line, or `None` when the texts are identical.
///
/// Texts that differ only in their line separators or a missing final
/// separator are reported at the line after the last one.
pub fn first_mismatch(expected: &str, actual: &str) -> Option<LineMismatch> {
    if expected == actual {
        return None;
    }

    let mut exp = expected.split_inclusive('\n');
    let mut act = actual.split_inclusive('\n');
    let mut line = 0;
    loop {
        line += 1;
        match (exp.next(), act.next()) {
            (None, None) => {
                return Some(LineMismatch {
                    line,
                    expected: None,
                    actual: None,
                });
            }
            (e, a) if e == a => continue,
            (e, a) => {
                return Some(LineMismatch {
                    line,
                    expected: e.map(str::to_string),
                    actual: a.map(str::to_string),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ant_total_time_line() {
        let normalizer = Normalizer::new([TOTAL_TIME_PATTERN]).unwrap();
        let text = "build:\n\nBUILD SUCCESSFUL\n\nTotal time: 2 seconds\n";
        assert_eq!(normalizer.apply(text), "build:\n\nBUILD SUCCESSFUL\n\n\n");
    }

    #[test]
    fn only_first_match_is_replaced() {
        let normalizer = Normalizer::new(["x"]).unwrap();
        assert_eq!(normalizer.apply("x-x-x"), "-x-x");
    }

    #[test]
    fn patterns_apply_in_order() {
        let normalizer = Normalizer::new(["/home/[a-z]+", "basedir="]).unwrap();
        assert_eq!(normalizer.apply("basedir=/home/ant/x"), "/x");
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(Normalizer::new(["(unclosed"]).is_err());
    }

    #[test]
    fn empty_normalizer_is_identity() {
        let normalizer = Normalizer::default();
        assert!(normalizer.is_empty());
        assert_eq!(normalizer.apply("as is\n"), "as is\n");
    }

    #[test]
    fn identical_transcripts_have_no_mismatch() {
        assert_eq!(first_mismatch("a\nb\n", "a\nb\n"), None);
    }

    #[test]
    fn reports_first_differing_line() {
        let m = first_mismatch("a\nb\nc\n", "a\nB\nc\n").unwrap();
        assert_eq!(m.line, 2);
        assert_eq!(m.expected.as_deref(), Some("b\n"));
        assert_eq!(m.actual.as_deref(), Some("B\n"));
        assert_eq!(m.to_string(), "line 2: expected \"b\\n\", got \"B\\n\"");
    }

    #[test]
    fn reports_truncated_transcript() {
        let m = first_mismatch("a\nb\n", "a\n").unwrap();
        assert_eq!(m.line, 2);
        assert_eq!(m.actual, None);
        assert!(m.to_string().contains("<end of transcript>"));
    }

    #[test]
    fn reports_missing_final_separator() {
        let m = first_mismatch("a\n", "a").unwrap();
        assert_eq!(m.line, 1);
        assert_eq!(m.expected.as_deref(), Some("a\n"));
        assert_eq!(m.actual.as_deref(), Some("a"));
    }
}
