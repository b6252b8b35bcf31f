//! Compliance module
//!
//! Provides the GDPR and HIPAA rule categories the scanner evaluates.
//!
//! # Rule Categories
//!
//! ## GDPR
//!
//! Personal data indicators: a keyword list (`name`, `email`, `ssn`, ...)
//! plus social security number, phone number and email address patterns.
//!
//! ## HIPAA
//!
//! Protected health information indicators: a keyword list only
//! (`patient`, `medical`, `doctor`, ...). Violations are labelled `PHI`.
//!
//! # Examples
//!
//! ```
//! use granite_regulate::detection::compliance::{EnabledRules, RuleCategory};
//!
//! let rules: EnabledRules = "hipaa, gdpr".parse().unwrap();
//! assert_eq!(rules.categories(), vec![RuleCategory::Gdpr, RuleCategory::Hipaa]);
//! assert_eq!(RuleCategory::Hipaa.label(), "PHI");
//! ```

pub mod gdpr;
pub mod hipaa;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule category evaluated by the pattern detector
///
/// # Serialization
///
/// Uses lowercase names for TOML/JSON: `"gdpr"`, `"hipaa"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// GDPR personal data (European Union)
    Gdpr,

    /// HIPAA protected health information (United States)
    #[serde(alias = "phi")]
    Hipaa,
}

impl RuleCategory {
    /// All categories in evaluation order
    pub const ALL: [RuleCategory; 2] = [RuleCategory::Gdpr, RuleCategory::Hipaa];

    /// Label used in violation messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gdpr => "GDPR",
            Self::Hipaa => "PHI",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gdpr => write!(f, "gdpr"),
            Self::Hipaa => write!(f, "hipaa"),
        }
    }
}

impl FromStr for RuleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gdpr" => Ok(Self::Gdpr),
            "hipaa" | "phi" => Ok(Self::Hipaa),
            other => Err(format!(
                "Unknown rule category '{other}'. Must be one of: gdpr, hipaa"
            )),
        }
    }
}

/// Set of enabled rule categories
///
/// Iteration order is always GDPR first, then HIPAA, independent of the
/// order the categories were given in. This keeps violation ordering stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledRules {
    gdpr: bool,
    hipaa: bool,
}

impl EnabledRules {
    /// Both categories
    pub fn all() -> Self {
        Self {
            gdpr: true,
            hipaa: true,
        }
    }

    /// No categories
    pub fn none() -> Self {
        Self {
            gdpr: false,
            hipaa: false,
        }
    }

    /// Only the given category
    pub fn only(category: RuleCategory) -> Self {
        Self::none().with(category)
    }

    /// Enable one more category
    pub fn with(mut self, category: RuleCategory) -> Self {
        match category {
            RuleCategory::Gdpr => self.gdpr = true,
            RuleCategory::Hipaa => self.hipaa = true,
        }
        self
    }

    /// Whether a category is enabled
    pub fn contains(&self, category: RuleCategory) -> bool {
        match category {
            RuleCategory::Gdpr => self.gdpr,
            RuleCategory::Hipaa => self.hipaa,
        }
    }

    /// Enabled categories in evaluation order
    pub fn categories(&self) -> Vec<RuleCategory> {
        RuleCategory::ALL
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }

    /// True when nothing is enabled
    pub fn is_empty(&self) -> bool {
        !self.gdpr && !self.hipaa
    }
}

impl Default for EnabledRules {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<RuleCategory> for EnabledRules {
    fn from_iter<I: IntoIterator<Item = RuleCategory>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

impl FromStr for EnabledRules {
    type Err = String;

    /// Parse a comma-separated list such as `gdpr,hipaa`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rules = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(RuleCategory::from_str)
            .collect::<Result<EnabledRules, _>>()?;

        if rules.is_empty() {
            return Err("At least one rule category must be enabled".to_string());
        }
        Ok(rules)
    }
}

impl fmt::Display for EnabledRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.categories().iter().map(|c| c.to_string()).collect();
        write!(f, "{}", names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(RuleCategory::Gdpr.label(), "GDPR");
        assert_eq!(RuleCategory::Hipaa.label(), "PHI");
    }

    #[test]
    fn test_parse_category_aliases() {
        assert_eq!("GDPR".parse::<RuleCategory>(), Ok(RuleCategory::Gdpr));
        assert_eq!(" phi ".parse::<RuleCategory>(), Ok(RuleCategory::Hipaa));
        assert!("ccpa".parse::<RuleCategory>().is_err());
    }

    #[test]
    fn test_enabled_rules_order_is_fixed() {
        let rules: EnabledRules = "hipaa,gdpr".parse().unwrap();
        assert_eq!(
            rules.categories(),
            vec![RuleCategory::Gdpr, RuleCategory::Hipaa]
        );
        assert_eq!(rules.to_string(), "gdpr,hipaa");
    }

    #[test]
    fn test_enabled_rules_rejects_empty_list() {
        assert!(" , ".parse::<EnabledRules>().is_err());
        assert!("".parse::<EnabledRules>().is_err());
    }

    #[test]
    fn test_only() {
        let rules = EnabledRules::only(RuleCategory::Hipaa);
        assert!(rules.contains(RuleCategory::Hipaa));
        assert!(!rules.contains(RuleCategory::Gdpr));
    }

    #[test]
    fn test_category_serde_alias() {
        #[derive(Deserialize)]
        struct Wrapper {
            rules: Vec<RuleCategory>,
        }

        let parsed: Wrapper = toml::from_str(r#"rules = ["gdpr", "phi", "hipaa"]"#).unwrap();
        assert_eq!(
            parsed.rules,
            vec![RuleCategory::Gdpr, RuleCategory::Hipaa, RuleCategory::Hipaa]
        );
    }
}
