use crate::container::item::Category;
use crate::container::key::Key;
use thiserror::Error;

/// Error types for the catmap-rs library.
///
/// Every variant describes a usage error: all errors are raised
/// synchronously to the caller of the offending operation, none are
/// transient or retryable, and a failed operation leaves the container
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContainerError {
    /// The inserted object's category does not match the container's
    /// declared category.
    #[error(
        "invalid assignment to '{container}' at key {key}: the object being \
         inserted has the wrong category: expected {expected}, got {found}"
    )]
    CategoryMismatch {
        container: String,
        key: Key,
        expected: Category,
        found: Category,
    },

    /// The inserted object already belongs to a container (possibly this
    /// one, under a different key). Ownership is never silently stolen.
    #[error(
        "invalid assignment to '{container}' at key {key}: a parent container \
         has already been assigned to the object being inserted: '{owner}'"
    )]
    AlreadyOwned {
        container: String,
        key: Key,
        owner: String,
    },

    /// A lookup or removal referenced an absent key.
    #[error("key not found: {key}")]
    KeyNotFound { key: Key },

    /// Conflicting bulk initializers were supplied at construction time.
    #[error("'{container}' was given more than one bulk entry initializer")]
    ConflictingInit { container: String },
}

/// Result type alias for catmap-rs operations.
pub type Result<T> = std::result::Result<T, ContainerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContainerError::CategoryMismatch {
            container: "model".to_string(),
            key: Key::from(3),
            expected: Category::new("V"),
            found: Category::new("C"),
        };
        let text = format!("{}", err);
        assert!(text.contains("model"));
        assert!(text.contains("expected V, got C"));

        let err = ContainerError::KeyNotFound {
            key: Key::from("decay"),
        };
        assert!(format!("{}", err).contains("decay"));
    }

    #[test]
    fn test_already_owned_names_owner() {
        let err = ContainerError::AlreadyOwned {
            container: "block_b".to_string(),
            key: Key::from(0),
            owner: "block_a".to_string(),
        };
        assert!(format!("{}", err).contains("'block_a'"));
    }
}
