//! Input validation for fragments and tags.
//!
//! Tag names are free-form: any non-empty string once surrounding whitespace
//! is trimmed. Fragment titles and bodies must not be blank.

/// Trims a tag name and checks that something is left.
///
/// # Examples
/// ```
/// use codewallet::tags::validation::normalize_tag_name;
///
/// assert_eq!(normalize_tag_name("  rust ").unwrap(), "rust");
/// assert_eq!(normalize_tag_name("C Header").unwrap(), "C Header");
///
/// assert!(normalize_tag_name("").is_err());
/// assert!(normalize_tag_name("   ").is_err());
/// ```
pub fn normalize_tag_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTagName);
    }
    Ok(trimmed.to_string())
}

/// Checks that a fragment title is not blank.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// Checks that a fragment body is not blank.
pub fn validate_body(body: &str) -> Result<(), ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::EmptyBody);
    }
    Ok(())
}

/// Error type for validation failures.
///
/// These never mutate the store: an operation that fails validation leaves
/// every collection exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Tag name is empty after trimming
    EmptyTagName,
    /// A tag with this name is already registered
    DuplicateTag(String),
    /// Fragment title is empty after trimming
    EmptyTitle,
    /// Fragment body is empty after trimming
    EmptyBody,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTagName => write!(f, "tag name cannot be empty"),
            ValidationError::DuplicateTag(name) => {
                write!(f, "tag '{}' already exists", name)
            }
            ValidationError::EmptyTitle => write!(f, "title cannot be empty"),
            ValidationError::EmptyBody => write!(f, "body cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}
