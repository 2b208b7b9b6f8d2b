/**
 * Validation
 * Field-level checks a blog post must pass before any write
 */
use serde::{Deserialize, Serialize};

use crate::db::models::BlogPost;

pub const NOT_BLANK: &str = "This value should not be blank.";

/// Whitespace-only counts as blank. Update skips blank values; validation
/// rejects them.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// A single field-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub property_path: String,
    pub message: String,
}

impl ValidationError {
    fn new(property_path: &str, message: &str) -> Self {
        Self {
            property_path: property_path.to_string(),
            message: message.to_string(),
        }
    }
}

/// Validate a post. An empty list means the post may be written.
/// Errors come back in field order.
pub fn validate(post: &BlogPost) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if is_blank(&post.title) {
        errors.push(ValidationError::new("title", NOT_BLANK));
    }
    if is_blank(&post.content) {
        errors.push(ValidationError::new("content", NOT_BLANK));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_post_has_no_errors() {
        let post = BlogPost::new("Hello".to_string(), "World".to_string(), None);
        assert!(validate(&post).is_empty());
    }

    #[test]
    fn test_is_blank_treats_whitespace_as_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_blank_fields_are_reported_in_order() {
        let post = BlogPost::new("".to_string(), "   ".to_string(), None);
        let errors = validate(&post);
        assert_eq!(
            errors,
            vec![
                ValidationError::new("title", NOT_BLANK),
                ValidationError::new("content", NOT_BLANK),
            ]
        );
    }
}
