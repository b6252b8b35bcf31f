//! HIPAA rule category: protected health information keywords

/// Keywords whose presence (case-insensitive substring) indicates health data
pub const PHI_KEYWORDS: [&str; 6] = [
    "patient",
    "medical",
    "doctor",
    "condition",
    "treatment",
    "prescription",
];
