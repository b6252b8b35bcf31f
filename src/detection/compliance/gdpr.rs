//! GDPR rule category: personal data keywords and identifier patterns

/// Keywords whose presence (case-insensitive substring) indicates personal data
pub const GDPR_KEYWORDS: [&str; 11] = [
    "name",
    "email",
    "phone",
    "address",
    "social security",
    "account number",
    "ssn",
    "telephone",
    "cellphone",
    "passport",
    "driver's license",
];

/// Social security number: `123-45-6789`
pub const SSN_PATTERN: &str = r"\d{3}-\d{2}-\d{4}";

/// International or local phone number with optional prefix and area code
pub const PHONE_PATTERN: &str =
    r"\+?\d{1,4}?[.-]?\(?\d{1,3}?\)?[.-]?\d{1,4}[.-]?\d{1,4}[.-]?\d{1,4}";

/// Email address
pub const EMAIL_PATTERN: &str = r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9\-.]+";

/// Named patterns in evaluation order
pub fn gdpr_patterns() -> [(&'static str, &'static str); 3] {
    [
        ("ssn", SSN_PATTERN),
        ("phone", PHONE_PATTERN),
        ("email", EMAIL_PATTERN),
    ]
}
