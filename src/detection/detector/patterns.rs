//! Compiled rule set shared by every scan
//!
//! The rule set is built once per process and never mutated, so any number
//! of concurrent scans can read it without locking.

use crate::detection::compliance::{gdpr, hipaa, RuleCategory};
use lazy_static::lazy_static;
use regex::Regex;

/// Compiled regex with the name used in debug output
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Short identifier (`ssn`, `phone`, `email`)
    pub name: &'static str,
    /// Compiled regex
    pub regex: Regex,
}

/// Keywords and patterns for one rule category
#[derive(Debug, Clone)]
pub struct CategoryRules {
    /// Category these rules belong to
    pub category: RuleCategory,
    /// Lower-case keywords matched as substrings of the lower-cased text
    pub keywords: &'static [&'static str],
    /// Case-sensitive, unanchored patterns
    pub patterns: Vec<CompiledPattern>,
}

/// The full, immutable rule set
#[derive(Debug)]
pub struct RuleSet {
    gdpr: CategoryRules,
    hipaa: CategoryRules,
}

lazy_static! {
    static ref STANDARD_RULES: RuleSet = RuleSet::compile();
}

impl RuleSet {
    /// Process-wide standard rule set
    pub fn standard() -> &'static RuleSet {
        &STANDARD_RULES
    }

    fn compile() -> Self {
        let patterns = gdpr::gdpr_patterns()
            .into_iter()
            .map(|(name, source)| CompiledPattern {
                name,
                // The sources are compile-time constants covered by tests.
                regex: Regex::new(source).expect("built-in GDPR pattern must compile"),
            })
            .collect();

        Self {
            gdpr: CategoryRules {
                category: RuleCategory::Gdpr,
                keywords: &gdpr::GDPR_KEYWORDS,
                patterns,
            },
            hipaa: CategoryRules {
                category: RuleCategory::Hipaa,
                keywords: &hipaa::PHI_KEYWORDS,
                patterns: Vec::new(),
            },
        }
    }

    /// Rules for a category
    pub fn rules_for(&self, category: RuleCategory) -> &CategoryRules {
        match category {
            RuleCategory::Gdpr => &self.gdpr,
            RuleCategory::Hipaa => &self.hipaa,
        }
    }

    /// Pattern by name, if the category has one
    pub fn pattern(&self, category: RuleCategory, name: &str) -> Option<&CompiledPattern> {
        self.rules_for(category)
            .patterns
            .iter()
            .find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rules_compile() {
        let rules = RuleSet::standard();
        assert_eq!(rules.rules_for(RuleCategory::Gdpr).patterns.len(), 3);
        assert_eq!(rules.rules_for(RuleCategory::Gdpr).keywords.len(), 11);
        assert!(rules.rules_for(RuleCategory::Hipaa).patterns.is_empty());
        assert_eq!(rules.rules_for(RuleCategory::Hipaa).keywords.len(), 6);
    }

    #[test]
    fn test_ssn_pattern_grouping() {
        let ssn = RuleSet::standard()
            .pattern(RuleCategory::Gdpr, "ssn")
            .unwrap();
        assert!(ssn.regex.is_match("SSN: 123-45-6789"));
        assert!(!ssn.regex.is_match("123-456-789"));
        assert!(!ssn.regex.is_match("12-345-6789"));
    }

    #[test]
    fn test_email_pattern() {
        let email = RuleSet::standard()
            .pattern(RuleCategory::Gdpr, "email")
            .unwrap();
        assert!(email.regex.is_match("reach me at first.last+tag@mail-host.co.uk"));
        assert!(!email.regex.is_match("not-an-email"));
        assert!(!email.regex.is_match("user@localhost"));
    }

    #[test]
    fn test_phone_pattern() {
        let phone = RuleSet::standard()
            .pattern(RuleCategory::Gdpr, "phone")
            .unwrap();
        assert!(phone.regex.is_match("+1 (555) 123-4567"));
        assert!(phone.regex.is_match("555.123.4567"));
        assert!(phone.regex.is_match("12345"));
        // Fewer than five digits can never satisfy the five digit groups
        assert!(!phone.regex.is_match("1-2-3-4"));
        assert!(!phone.regex.is_match("no digits here"));
    }

    #[test]
    fn test_patterns_are_case_sensitive_literals() {
        let email = RuleSet::standard()
            .pattern(RuleCategory::Gdpr, "email")
            .unwrap();
        assert_eq!(email.regex.as_str(), gdpr::EMAIL_PATTERN);
    }
}
