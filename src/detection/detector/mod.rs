//! Pattern detection module
//!
//! Provides a trait-based detection interface and the keyword/regex
//! implementation that decides whether a block of text is a violation.

pub mod patterns;

use crate::detection::compliance::RuleCategory;
use crate::detection::models::Indicator;
use patterns::{CategoryRules, RuleSet};

/// Trait for rule category detectors
pub trait ViolationDetector: Send + Sync {
    /// Category this detector decides on
    fn category(&self) -> RuleCategory;

    /// True if any keyword or pattern of the category matches
    fn matches(&self, text: &str) -> bool;

    /// Every individual keyword and pattern that matches, for diagnostics
    fn indicators(&self, text: &str) -> Vec<Indicator>;
}

/// Keyword and regex detector backed by the shared [`RuleSet`]
///
/// Keywords are matched against the lower-cased text; patterns are matched
/// case-sensitively against the original text.
#[derive(Debug, Clone, Copy)]
pub struct RuleDetector {
    rules: &'static CategoryRules,
}

impl RuleDetector {
    /// Detector for a category of the standard rule set
    pub fn new(category: RuleCategory) -> Self {
        Self {
            rules: RuleSet::standard().rules_for(category),
        }
    }

    /// GDPR detector
    pub fn gdpr() -> Self {
        Self::new(RuleCategory::Gdpr)
    }

    /// HIPAA/PHI detector
    pub fn hipaa() -> Self {
        Self::new(RuleCategory::Hipaa)
    }
}

impl ViolationDetector for RuleDetector {
    fn category(&self) -> RuleCategory {
        self.rules.category
    }

    fn matches(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let lowered = text.to_lowercase();
        if self.rules.keywords.iter().any(|k| lowered.contains(k)) {
            return true;
        }

        self.rules.patterns.iter().any(|p| p.regex.is_match(text))
    }

    fn indicators(&self, text: &str) -> Vec<Indicator> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let keywords = self
            .rules
            .keywords
            .iter()
            .filter(|k| lowered.contains(*k))
            .map(|k| Indicator::Keyword(*k));

        let patterns = self
            .rules
            .patterns
            .iter()
            .filter(|p| p.regex.is_match(text))
            .map(|p| Indicator::Pattern(p.name));

        keywords.chain(patterns).collect()
    }
}

/// True if the text holds a GDPR personal data indicator
///
/// ```
/// use granite_regulate::detection::matches_gdpr;
///
/// assert!(matches_gdpr("Contact: john@example.com"));
/// assert!(!matches_gdpr("The sky is blue."));
/// ```
pub fn matches_gdpr(text: &str) -> bool {
    RuleDetector::gdpr().matches(text)
}

/// True if the text holds a HIPAA protected health information indicator
///
/// ```
/// use granite_regulate::detection::matches_phi;
///
/// assert!(matches_phi("Patient has a fever."));
/// assert!(!matches_phi("Quarterly revenue rose."));
/// ```
pub fn matches_phi(text: &str) -> bool {
    RuleDetector::hipaa().matches(text)
}
