//! Shared application state

use crate::config::RegulateConfig;
use crate::core::ComplianceScanner;
use crate::detection::EnabledRules;
use crate::domain::Result;
use std::sync::Arc;

/// State handed to every handler
///
/// Holds only immutable data; requests never share mutable state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Scanner with its configured collaborators
    pub scanner: Arc<ComplianceScanner>,
    /// Categories used when a request does not choose its own
    pub default_rules: EnabledRules,
}

impl AppState {
    pub fn new(scanner: ComplianceScanner, default_rules: EnabledRules) -> Self {
        Self {
            scanner: Arc::new(scanner),
            default_rules,
        }
    }

    /// State built from validated configuration
    pub fn from_config(config: &RegulateConfig) -> Result<Self> {
        Ok(Self::new(
            ComplianceScanner::from_config(config)?,
            config.detection.enabled_rules(),
        ))
    }
}
