//! Compliance detection
//!
//! Keyword and regex rules that decide whether a block of text carries GDPR
//! personal data or HIPAA protected health information, and the collector that
//! runs them over extracted documents.

pub mod collector;
pub mod compliance;
pub mod detector;
pub mod models;

pub use collector::{collect, ViolationCollector};
pub use compliance::{EnabledRules, RuleCategory};
pub use detector::{matches_gdpr, matches_phi, RuleDetector, ViolationDetector};
pub use models::{Indicator, ScanOutcome, Violation, ViolationLocation, NO_CONTENT_MESSAGE};
