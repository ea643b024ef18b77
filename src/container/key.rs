//! Storage keys for categorized containers
//!
//! Keys are the values under which a container indexes its children. They
//! are small, hashable, comparable values: an integer, a string, or a tuple
//! of keys (used for multi-dimensional indexing of model components).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A storage key for a categorized container.
///
/// Keys are cheap to clone, hashable, and totally ordered. The tuple
/// variant nests arbitrarily, so a component indexed by `(scenario, stage)`
/// uses a single `Key::Tuple` value.
///
/// # Examples
///
/// ```
/// use catmap_rs::container::key::Key;
///
/// let k = Key::from(3);
/// assert_eq!(k.to_string(), "3");
///
/// let k = Key::from("demand");
/// assert_eq!(k.to_string(), "demand");
///
/// let k = Key::from(vec![Key::from(1), Key::from("x")]);
/// assert_eq!(k.to_string(), "(1, x)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    /// An integer index, e.g. a position in an indexed block
    Int(i64),

    /// A string name, e.g. a component label
    Str(String),

    /// A composite index built from other keys
    Tuple(Vec<Key>),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
            Key::Tuple(parts) => {
                write!(f, "(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", part)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<Vec<Key>> for Key {
    fn from(value: Vec<Key>) -> Self {
        Key::Tuple(value)
    }
}

impl From<(i64, i64)> for Key {
    fn from(value: (i64, i64)) -> Self {
        Key::Tuple(vec![Key::Int(value.0), Key::Int(value.1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(Key::from(42).to_string(), "42");
        assert_eq!(Key::from("x").to_string(), "x");
        assert_eq!(Key::from((2, 5)).to_string(), "(2, 5)");

        let nested = Key::Tuple(vec![Key::from("s"), Key::from((1, 2))]);
        assert_eq!(nested.to_string(), "(s, (1, 2))");
    }

    #[test]
    fn test_key_equality_and_ordering() {
        assert_eq!(Key::from(1), Key::from(1));
        assert_ne!(Key::from(1), Key::from("1"));
        assert!(Key::from(1) < Key::from(2));
    }
}
