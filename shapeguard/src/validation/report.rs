//! Human-readable violation reports.

use super::violation::Violation;

/// Formats violations as a single diagnostic message.
///
/// ```text
/// Validation failed with 2 violation(s):
///   - email: does not match format
///   - address.zip: is required
/// ```
#[must_use]
pub fn format_report(violations: &[Violation]) -> String {
    render(
        format!("Validation failed with {} violation(s):", violations.len()),
        violations,
    )
}

/// Like [`format_report`], naming the contract in the header.
#[must_use]
pub fn format_report_for(contract: &str, violations: &[Violation]) -> String {
    render(
        format!(
            "Validation failed for contract '{contract}' with {} violation(s):",
            violations.len()
        ),
        violations,
    )
}

fn render(header: String, violations: &[Violation]) -> String {
    violations.iter().fold(header, |mut out, violation| {
        out.push_str(&format!("\n  - {violation}"));
        out
    })
}
