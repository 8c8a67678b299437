//! Marker-comment splicing: the rendered issue fragment replaces whatever
//! sits between the markers in the page template.

use crate::error::ExitError;

pub const ISSUES_START: &str = "<!-- issueboard:issues-start -->";
pub const ISSUES_END: &str = "<!-- issueboard:issues-end -->";

/// Replace the content between the markers with `fragment`. The markers
/// themselves are kept so the output can be re-spliced.
pub fn splice(content: &str, fragment: &str) -> Result<String, ExitError> {
    validate(content)?;
    let start = content
        .find(ISSUES_START)
        .ok_or_else(|| ExitError::Template(missing(ISSUES_START)))?;
    let end = content
        .find(ISSUES_END)
        .ok_or_else(|| ExitError::Template(missing(ISSUES_END)))?;

    let before = &content[..start + ISSUES_START.len()];
    let after = &content[end..];
    Ok(format!("{before}\n{fragment}\n{after}"))
}

/// Check the template carries both markers, exactly once, in order.
pub fn validate(content: &str) -> Result<(), ExitError> {
    let start = content
        .find(ISSUES_START)
        .ok_or_else(|| ExitError::Template(missing(ISSUES_START)))?;
    let end = content
        .find(ISSUES_END)
        .ok_or_else(|| ExitError::Template(missing(ISSUES_END)))?;

    if end < start {
        return Err(ExitError::Template(
            "issues markers are out of order".to_string(),
        ));
    }
    if content.matches(ISSUES_START).count() > 1 || content.matches(ISSUES_END).count() > 1 {
        return Err(ExitError::Template(
            "issues markers appear more than once".to_string(),
        ));
    }
    Ok(())
}

fn missing(marker: &str) -> String {
    format!("template is missing the {marker} marker")
}
