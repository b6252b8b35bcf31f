//! Rendered report tests

use granite_regulate::report::{generate_report, ReportLayout, NO_VIOLATIONS};

fn page_count(pdf: &[u8]) -> usize {
    lopdf::Document::load_mem(pdf).unwrap().get_pages().len()
}

#[test]
fn test_empty_report_has_one_page() {
    let pdf = generate_report(&[]).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    assert_eq!(page_count(&pdf), 1);

    let layout = ReportLayout::build(&[]);
    assert_eq!(layout.content_lines(), vec![NO_VIOLATIONS]);
}

#[test]
fn test_rendered_pages_match_layout() {
    let violations: Vec<String> = (1..=150)
        .map(|row| format!("PHI Violation found in row {row}, column 'diagnosis'"))
        .collect();

    let layout = ReportLayout::build(&violations);
    let pdf = generate_report(&violations).unwrap();

    assert!(layout.page_count() >= 4);
    assert_eq!(page_count(&pdf), layout.page_count());
}

#[test]
fn test_report_is_deterministic_in_layout() {
    let violations = vec![
        "GDPR Violation found in row 2, column 'email'".to_string(),
        "GDPR Violation found in row 1, column 'email'".to_string(),
    ];
    let layout = ReportLayout::build(&violations);

    assert_eq!(
        layout.content_lines(),
        vec![violations[0].as_str(), violations[1].as_str()]
    );
}
