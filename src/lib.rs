//! # catmap-rs
//!
//! `catmap-rs` is a categorized, single-ownership container for assembling
//! hierarchical model component trees, the storage discipline behind
//! symbolic modeling toolkits where every component (a parameter, a
//! variable block, a nested sub-model) must live in exactly one place.
//!
//! The library provides:
//! - A dict-like container enforcing category homogeneity and single
//!   ownership of its entries
//! - The [`Ownable`](container::Ownable) contract any stored value must
//!   satisfy, with an embeddable [`OwnerLink`](container::OwnerLink) that
//!   implements the owner relation once
//! - Pluggable diagnostics for implicit replacements
//! - An adapter for nesting containers inside containers
//!
//! ## Basic Usage
//!
//! ```
//! use std::rc::Rc;
//! use catmap_rs::container::{Category, DictContainer, LeafItem, Ownable};
//! use catmap_rs::ContainerError;
//!
//! const VARIABLE: Category = Category::new("V");
//!
//! let mut vars = DictContainer::new("vars", VARIABLE);
//! let x = Rc::new(LeafItem::new("x", VARIABLE));
//! vars.insert("x", x.clone()).unwrap();
//!
//! // An owned item cannot be claimed by a second container.
//! let mut other = DictContainer::new("other", VARIABLE);
//! let err = other.insert(0, x.clone()).unwrap_err();
//! assert!(matches!(err, ContainerError::AlreadyOwned { .. }));
//!
//! // Detach first, then move.
//! let x = vars.remove("x").unwrap();
//! other.insert(0, x).unwrap();
//! ```

// Public modules
pub mod error;

// Container system
pub mod container;

// Re-exports for convenience
pub use container::{Category, DictContainer, Key, LeafItem, Ownable};
pub use error::{ContainerError, Result};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
