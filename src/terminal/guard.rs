use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
struct DangerousPattern {
    raw: String,
    regex: Regex,
}

/// Substrings that make the shell refuse a line instead of dispatching it.
///
/// Matching is a case-insensitive substring test anywhere in the line, so
/// `sudo` also trips on `sudoku`. That permissiveness is intended.
#[derive(Debug, Clone)]
pub struct DangerousPatterns {
    patterns: Vec<DangerousPattern>,
}

impl DangerousPatterns {
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let raw = p.as_ref().to_string();
                RegexBuilder::new(&regex::escape(&raw))
                    .case_insensitive(true)
                    .build()
                    .map(|regex| DangerousPattern { raw, regex })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns the first configured pattern found in `line`.
    pub fn matches(&self, line: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(line))
            .map(|p| p.raw.as_str())
    }

    pub fn raw_patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.raw.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively_anywhere() {
        let guard = DangerousPatterns::new(["sudo", "rm -rf"]).unwrap();
        assert_eq!(guard.matches("SUDO apt install"), Some("sudo"));
        assert_eq!(guard.matches("echo hi; Rm -Rf /"), Some("rm -rf"));
        assert_eq!(guard.matches("cat sudoku.txt"), Some("sudo"));
        assert_eq!(guard.matches("ls -la"), None);
    }

    #[test]
    fn metacharacters_are_literal() {
        let guard = DangerousPatterns::new([":(){ :|:& };:"]).unwrap();
        assert!(guard.matches("run :(){ :|:& };: now").is_some());
        assert!(guard.matches("::").is_none());
    }

    #[test]
    fn empty_list_matches_nothing() {
        let guard = DangerousPatterns::new(Vec::<String>::new()).unwrap();
        assert!(guard.is_empty());
        assert!(guard.matches("sudo rm -rf /").is_none());
    }
}
