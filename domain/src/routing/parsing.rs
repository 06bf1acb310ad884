//! Category-array extraction for the assisted routing tier.
//!
//! The primary advisor is asked to answer with a JSON array of category
//! names, but replies are free text. This is a deliberately narrow,
//! heuristic parse: find the first bracket-delimited array of strings in the
//! text. It is not a general JSON parser.

use crate::advisor::AdvisorId;
use thiserror::Error;

/// Why a routing reply could not be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    #[error("no array of strings found in routing reply")]
    NoArray,
}

/// Parsed assisted-routing reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    /// Recognised advisors, in reply order, without duplicates
    pub advisors: Vec<AdvisorId>,
    /// Names that did not map to a routable specialist
    pub rejected: Vec<String>,
}

/// Locate the first well-formed `["...", ...]` literal in `text`.
///
/// Every `[` is tried in order against the next `]`; the first slice that
/// deserializes as a list of strings wins.
pub fn extract_string_array(text: &str) -> Result<Vec<String>, CategoryParseError> {
    for (start, _) in text.match_indices('[') {
        let Some(len) = text[start..].find(']') else {
            break;
        };
        let candidate = &text[start..start + len + 1];
        if let Ok(values) = serde_json::from_str::<Vec<String>>(candidate) {
            return Ok(values);
        }
    }
    Err(CategoryParseError::NoArray)
}

/// Extract advisor categories from a routing reply.
///
/// Only specialists are routable here; unknown names and the primary
/// advisor (under any alias) are collected in [`CategorySelection::rejected`]
/// for the caller to log. They never fail the parse.
pub fn extract_category_array(text: &str) -> Result<CategorySelection, CategoryParseError> {
    let names = extract_string_array(text)?;
    let mut selection = CategorySelection::default();

    for name in names {
        match name.parse::<AdvisorId>() {
            Ok(advisor) if !AdvisorId::SPECIALISTS.contains(&advisor) => {
                selection.rejected.push(name)
            }
            Ok(advisor) if !selection.advisors.contains(&advisor) => {
                selection.advisors.push(advisor)
            }
            Ok(_) => {}
            Err(_) => selection.rejected.push(name),
        }
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_array() {
        let sel = extract_category_array(r#"["safety", "recovery"]"#).unwrap();
        assert_eq!(sel.advisors, vec![AdvisorId::Safety, AdvisorId::Recovery]);
        assert!(sel.rejected.is_empty());
    }

    #[test]
    fn test_array_embedded_in_prose() {
        let reply = "Sure! Based on the query I would consult:\n```json\n[\"Nutrition\"]\n```\nHope that helps.";
        let sel = extract_category_array(reply).unwrap();
        assert_eq!(sel.advisors, vec![AdvisorId::Nutrition]);
    }

    #[test]
    fn test_skips_malformed_brackets() {
        // The first bracket pair is not a JSON string array
        let reply = "Categories [see below]: [\"scheduling\"]";
        let sel = extract_category_array(reply).unwrap();
        assert_eq!(sel.advisors, vec![AdvisorId::Scheduling]);
    }

    #[test]
    fn test_unknown_names_are_rejected_not_fatal() {
        let sel = extract_category_array(r#"["safety", "astrology", "safety"]"#).unwrap();
        assert_eq!(sel.advisors, vec![AdvisorId::Safety]);
        assert_eq!(sel.rejected, vec!["astrology".to_string()]);
    }

    #[test]
    fn test_primary_advisor_is_not_routable() {
        let sel = extract_category_array(r#"["nutrition", "coach", "General"]"#).unwrap();
        assert_eq!(sel.advisors, vec![AdvisorId::Nutrition]);
        assert_eq!(sel.rejected, vec!["coach".to_string(), "General".to_string()]);
    }

    #[test]
    fn test_no_array() {
        assert_eq!(
            extract_category_array("I think safety and recovery."),
            Err(CategoryParseError::NoArray)
        );
        assert_eq!(
            extract_category_array("[\"unterminated"),
            Err(CategoryParseError::NoArray)
        );
        assert_eq!(extract_category_array("[1, 2]"), Err(CategoryParseError::NoArray));
    }

    #[test]
    fn test_empty_array_is_valid() {
        let sel = extract_category_array("[]").unwrap();
        assert!(sel.advisors.is_empty());
    }
}
