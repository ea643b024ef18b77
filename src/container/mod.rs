//! # Categorized Ownership Container
//!
//! This module provides the storage layer of a model component tree: an
//! associative container whose entries are typed, ownable items. Every
//! item lives in exactly one place in the tree, is addressable by a stable
//! key from its parent, and can be re-inserted elsewhere only after being
//! cleanly detached.
//!
//! ## Key Features
//!
//! - **Single ownership**: each item belongs to at most one container at a
//!   time; conflicting insertions fail rather than silently stealing
//!   ownership
//! - **Category enforcement**: a container accepts only items whose
//!   category matches its declared category, fixed at construction
//! - **Deterministic traversal**: iteration follows insertion order
//! - **Structural equality**: containers compare by key set and stored
//!   object identity, never by item contents
//! - **Pluggable diagnostics**: implicit replacements are reported through
//!   an injectable sink instead of a hardcoded logger
//!
//! ## Core Components
//!
//! - [`DictContainer`]: the container itself
//! - [`Ownable`]: the contract stored items must satisfy
//! - [`LeafItem`]: the reference item implementation
//! - [`NestedContainer`]: adapter that lets a container be stored inside
//!   another container
//! - [`Key`] and [`Category`]: storage keys and category tags
//! - [`DiagnosticSink`]: receiver for replacement diagnostics
//!
//! ## Example Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use catmap_rs::container::{Category, DictContainer, LeafItem, Ownable};
//!
//! const VARIABLE: Category = Category::new("V");
//!
//! let mut vars = DictContainer::new("vars", VARIABLE);
//!
//! let x = Rc::new(LeafItem::new("x", VARIABLE));
//! let y = Rc::new(LeafItem::new("y", VARIABLE));
//!
//! vars.insert(0, x.clone()).unwrap();
//! vars.insert(1, y).unwrap();
//! assert_eq!(vars.len(), 2);
//!
//! // The container is x's owner until x is removed.
//! assert!(Rc::ptr_eq(&x.owner().unwrap(), vars.tag()));
//! let x = vars.remove(0).unwrap();
//! assert!(x.owner().is_none());
//! ```

pub mod diagnostics;
pub mod dict;
pub mod item;
pub mod key;
pub mod nested;


// Re-export key types
pub use diagnostics::{CollectingSink, DiagnosticSink, ReplacementEvent, ReplacementRecord, TracingSink};
pub use dict::{ContainerBuilder, DictContainer};
pub use item::{Category, ContainerTag, LeafItem, Ownable, OwnerLink};
pub use key::Key;
pub use nested::NestedContainer;
