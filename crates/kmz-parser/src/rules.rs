//! Ordered "try pattern, else next pattern, else default" evaluation.
//!
//! Every extractor resolves free-text fields this way, so the rule lists are
//! declared once (in `OnceLock` statics next to the extractor) and evaluated
//! through [`RuleSet`].

use regex::{Captures, Regex};

/// Maps the captures of a matching pattern to a value.
///
/// Returning `None` lets evaluation fall through to the next rule.
pub type Mapper<T> = fn(&Captures<'_>) -> Option<T>;

struct Rule<T> {
    pattern: Regex,
    map: Mapper<T>,
}

/// An ordered list of `(pattern, mapper)` rules; the first rule that both
/// matches and maps to a value wins.
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> RuleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex. Rule patterns are literals.
    pub fn rule(mut self, pattern: &str, map: Mapper<T>) -> Self {
        let pattern = Regex::new(pattern).expect("rule pattern is valid");
        self.rules.push(Rule { pattern, map });
        self
    }

    /// Value of the first rule that matches `text`.
    pub fn evaluate(&self, text: &str) -> Option<T> {
        self.rules.iter().find_map(|rule| {
            rule.pattern
                .captures(text)
                .and_then(|captures| (rule.map)(&captures))
        })
    }

    /// Like [`evaluate`](Self::evaluate) but falls back to `default`.
    pub fn evaluate_or(&self, text: &str, default: T) -> T {
        self.evaluate(text).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Capture group `index` parsed as an integer.
pub fn group_i64(captures: &Captures<'_>, index: usize) -> Option<i64> {
    captures.get(index)?.as_str().trim().parse().ok()
}

/// Capture group `index` parsed as a float.
pub fn group_f64(captures: &Captures<'_>, index: usize) -> Option<f64> {
    captures.get(index)?.as_str().trim().parse().ok()
}

/// Capture group `index` as trimmed, non-empty text.
pub fn group_text(captures: &Captures<'_>, index: usize) -> Option<String> {
    let text = captures.get(index)?.as_str().trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> RuleSet<f64> {
        RuleSet::new()
            .rule(r"^<5%$", |_| Some(2.5))
            .rule(r"(\d+)-(\d+)", |c| Some((group_f64(c, 1)? + group_f64(c, 2)?) / 2.0))
            .rule(r"(\d+)", |c| group_f64(c, 1))
    }

    #[test]
    fn test_first_match_wins() {
        let rules = numbers();
        assert_eq!(rules.evaluate("<5%"), Some(2.5));
        assert_eq!(rules.evaluate("10-20"), Some(15.0));
        assert_eq!(rules.evaluate("about 40"), Some(40.0));
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn test_default_when_nothing_matches() {
        assert_eq!(numbers().evaluate("none"), None);
        assert_eq!(numbers().evaluate_or("none", -1.0), -1.0);
    }

    #[test]
    fn test_mapper_none_falls_through() {
        let rules: RuleSet<i64> = RuleSet::new()
            .rule(r"(\d+)", |c| group_i64(c, 1).filter(|v| *v < 100))
            .rule(r".*", |_| Some(0));
        assert_eq!(rules.evaluate("250"), Some(0));
        assert_eq!(rules.evaluate("25"), Some(25));
    }

    #[test]
    fn test_group_text_trims() {
        let rules: RuleSet<String> = RuleSet::new().rule(r"Valid at:\s*([^<]+)", |c| group_text(c, 1));
        assert_eq!(
            rules.evaluate("Valid at: 5:00 AM EDT August 18<br>"),
            Some("5:00 AM EDT August 18".to_string())
        );
    }
}
