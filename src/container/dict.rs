//! The categorized ownership container
//!
//! This module provides the [`DictContainer`] struct, the dict-like storage
//! node of a model component tree. It maps storage keys to ownable items,
//! enforcing that every stored item matches the container's declared
//! category and that each item belongs to at most one container at a time.

use crate::container::diagnostics::{DiagnosticSink, ReplacementEvent, TracingSink};
use crate::container::item::{Category, ContainerTag, Ownable};
use crate::container::key::Key;
use crate::error::{ContainerError, Result};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// Two handles to the exact same object, metadata ignored.
fn same_object(a: &Rc<dyn Ownable>, b: &Rc<dyn Ownable>) -> bool {
    std::ptr::eq(
        Rc::as_ptr(a) as *const (),
        Rc::as_ptr(b) as *const (),
    )
}

/// An associative container of ownable items sharing one category.
///
/// The container maintains three invariants:
///
/// 1. Every stored item's `owner` is this container and its `storage_key`
///    is the key it is stored under.
/// 2. Every stored item's category equals the container's declared
///    category, fixed at construction.
/// 3. No item appears under two keys, here or in any other container.
///
/// Insertion order is preserved for iteration; it carries no semantic
/// weight beyond deterministic traversal. The container is a synchronous,
/// single-threaded structure: callers using it from multiple threads must
/// serialize all mutation externally.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use catmap_rs::container::dict::DictContainer;
/// use catmap_rs::container::item::{Category, LeafItem, Ownable};
/// use catmap_rs::container::key::Key;
///
/// const VARIABLE: Category = Category::new("V");
///
/// let mut vars = DictContainer::new("vars", VARIABLE);
/// let x = Rc::new(LeafItem::new("x", VARIABLE));
///
/// vars.insert("x", x.clone()).unwrap();
/// assert_eq!(vars.len(), 1);
/// assert_eq!(x.owner().unwrap().name(), "vars");
/// assert_eq!(x.storage_key(), Some(Key::from("x")));
///
/// let removed = vars.remove("x").unwrap();
/// assert!(removed.owner().is_none());
/// assert!(vars.is_empty());
/// ```
pub struct DictContainer {
    /// Identity handed out to stored items as their weak owner reference
    tag: Rc<ContainerTag>,

    /// Key to item mapping, in insertion order
    entries: IndexMap<Key, Rc<dyn Ownable>>,

    /// Receiver for implicit-replacement diagnostics
    sink: Rc<dyn DiagnosticSink>,
}

impl DictContainer {
    /// Create an empty container with the given name and declared
    /// category.
    ///
    /// The category is fixed for the container's lifetime; every inserted
    /// item must match it. Diagnostics go to the default [`TracingSink`]
    /// until [`set_sink`](Self::set_sink) replaces it.
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            tag: ContainerTag::new(name, category),
            entries: IndexMap::new(),
            sink: Rc::new(TracingSink),
        }
    }

    /// Start building a container, for callers who want to seed entries or
    /// configure the diagnostic sink up front.
    pub fn builder(name: impl Into<String>, category: Category) -> ContainerBuilder {
        ContainerBuilder::new(name, category)
    }

    /// The container's name.
    pub fn name(&self) -> &str {
        self.tag.name()
    }

    /// The container's declared category.
    pub fn category(&self) -> Category {
        self.tag.category()
    }

    /// The container's identity tag, as stored items see it.
    pub fn tag(&self) -> &Rc<ContainerTag> {
        &self.tag
    }

    /// Replace the diagnostic sink.
    pub fn set_sink(&mut self, sink: Rc<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    /// Render the name of the child stored at `key`, e.g. `vars[x]`.
    pub fn child_name(&self, key: impl Into<Key>) -> String {
        self.tag.child_name(&key.into())
    }

    /// Get the item stored at `key`.
    ///
    /// # Returns
    ///
    /// A reference to the stored item, or `KeyNotFound` if the key is
    /// absent. No side effects either way.
    pub fn get(&self, key: impl Into<Key>) -> Result<&Rc<dyn Ownable>> {
        let key = key.into();
        self.entries
            .get(&key)
            .ok_or(ContainerError::KeyNotFound { key })
    }

    /// Insert `item` at `key`, taking ownership of it.
    ///
    /// The checks run in a fixed order:
    ///
    /// 1. If the item's category differs from the declared category, fail
    ///    with `CategoryMismatch`. This precedes every ownership check, so
    ///    a wrongly-categorized item is rejected even when unattached.
    /// 2. If the item is unattached, insert it. If the key already held a
    ///    different item, that occupant is detached first and the
    ///    diagnostic sink is notified once; the operation still succeeds.
    /// 3. If the item is already stored in this container under this exact
    ///    key, do nothing and succeed. Deleting and reinserting the same
    ///    object at the same key collapses to a no-op.
    /// 4. Otherwise the item belongs to some container (this one under a
    ///    different key, or another one entirely): fail with
    ///    `AlreadyOwned`, naming the current owner. Ownership is never
    ///    silently stolen.
    ///
    /// On failure the container, the item, and any prior occupant of the
    /// key are all unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use catmap_rs::container::dict::DictContainer;
    /// use catmap_rs::container::item::{Category, LeafItem, Ownable};
    /// use catmap_rs::error::ContainerError;
    ///
    /// const VARIABLE: Category = Category::new("V");
    ///
    /// let mut vars = DictContainer::new("vars", VARIABLE);
    /// let x = Rc::new(LeafItem::new("x", VARIABLE));
    /// vars.insert(0, x.clone()).unwrap();
    ///
    /// // The same object cannot live under a second key.
    /// let err = vars.insert(1, x.clone()).unwrap_err();
    /// assert!(matches!(err, ContainerError::AlreadyOwned { .. }));
    ///
    /// // Reassigning it to its own key is a no-op.
    /// vars.insert(0, x).unwrap();
    /// assert_eq!(vars.len(), 1);
    /// ```
    pub fn insert(&mut self, key: impl Into<Key>, item: Rc<dyn Ownable>) -> Result<()> {
        let key = key.into();
        if item.category() != self.tag.category() {
            return Err(ContainerError::CategoryMismatch {
                container: self.tag.name().to_string(),
                key,
                expected: self.tag.category(),
                found: item.category(),
            });
        }
        match item.owner() {
            None => {
                if let Some(displaced) = self.entries.get(&key) {
                    self.sink.implicit_replacement(&ReplacementEvent {
                        container: &self.tag,
                        key: &key,
                        displaced,
                        incoming: &item,
                    });
                    displaced.detach();
                }
                item.attach(&self.tag, key.clone());
                self.entries.insert(key, item);
                Ok(())
            }
            Some(owner) => {
                if Rc::ptr_eq(&owner, &self.tag) {
                    if let Some(existing) = self.entries.get(&key) {
                        if same_object(existing, &item) {
                            // Delete-then-reinsert of the same object at the
                            // same key collapses to nothing.
                            return Ok(());
                        }
                    }
                }
                Err(ContainerError::AlreadyOwned {
                    container: self.tag.name().to_string(),
                    key,
                    owner: owner.name().to_string(),
                })
            }
        }
    }

    /// Remove and return the item stored at `key`, detaching it.
    ///
    /// After a successful removal the item's `owner` and `storage_key` are
    /// cleared and the item may be inserted elsewhere. The insertion order
    /// of the remaining entries is preserved.
    ///
    /// # Returns
    ///
    /// The detached item, or `KeyNotFound` if the key is absent.
    pub fn remove(&mut self, key: impl Into<Key>) -> Result<Rc<dyn Ownable>> {
        let key = key.into();
        let item = self
            .entries
            .shift_remove(&key)
            .ok_or(ContainerError::KeyNotFound { key })?;
        item.detach();
        Ok(item)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the container holds no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stored keys in insertion order.
    ///
    /// Each call starts a fresh iteration. Mutating the container
    /// invalidates in-flight iterators at the borrow level, so callers who
    /// need to mutate while walking should collect the keys first.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Iterate over `(key, item)` pairs in insertion order.
    pub fn items(&self) -> impl Iterator<Item = (&Key, &Rc<dyn Ownable>)> {
        self.entries.iter()
    }

    /// Insert every `(key, item)` pair from `entries`, in order.
    ///
    /// This is a convenience built entirely on [`insert`](Self::insert) and
    /// follows its rules for each pair. It stops at the first failure;
    /// pairs already inserted remain inserted.
    pub fn update<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (Key, Rc<dyn Ownable>)>,
    {
        for (key, item) in entries {
            self.insert(key, item)?;
        }
        Ok(())
    }

    /// Detach and drop every entry.
    ///
    /// Also runs on drop, so discarding a container never leaves an item's
    /// owner pointing at a container that no longer holds it.
    pub fn clear(&mut self) {
        for (_, item) in self.entries.drain(..) {
            item.detach();
        }
    }
}

impl Drop for DictContainer {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Structural equality: identical key sets where each key maps to the same
/// object instance in both containers.
///
/// Item contents are never compared. Two containers holding
/// equivalent-looking but distinct objects are unequal; item types with
/// rich internal state never have their own comparison triggered by a
/// container comparison.
impl PartialEq for DictContainer {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(key, item)| {
                    other
                        .entries
                        .get(key)
                        .is_some_and(|theirs| same_object(item, theirs))
                })
    }
}

/// Equality against a plain mapping holding handles to the same objects.
///
/// A plain map takes no ownership, so this is how a caller checks a
/// container against an expected key-to-instance layout without violating
/// single ownership.
impl PartialEq<IndexMap<Key, Rc<dyn Ownable>>> for DictContainer {
    fn eq(&self, other: &IndexMap<Key, Rc<dyn Ownable>>) -> bool {
        self.entries.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, item)| {
                    other.get(key).is_some_and(|theirs| same_object(item, theirs))
                })
    }
}

impl fmt::Debug for DictContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictContainer")
            .field("name", &self.tag.name())
            .field("category", &self.tag.category())
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`DictContainer`], carrying the optional bulk seed and sink
/// configuration.
///
/// At most one bulk entry seed may be supplied; a second call to
/// [`entries`](Self::entries) is a usage error reported by
/// [`build`](Self::build) before any entry is created.
pub struct ContainerBuilder {
    name: String,
    category: Category,
    sink: Option<Rc<dyn DiagnosticSink>>,
    seed: Option<Vec<(Key, Rc<dyn Ownable>)>>,
    conflicting_seed: bool,
}

impl ContainerBuilder {
    /// Start a builder for a container with the given name and category.
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            sink: None,
            seed: None,
            conflicting_seed: false,
        }
    }

    /// Use `sink` for diagnostics instead of the default [`TracingSink`].
    pub fn sink(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Seed the container with `entries`, inserted in order at build time.
    ///
    /// May be called at most once; a second call makes
    /// [`build`](Self::build) fail with `ConflictingInit`.
    pub fn entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (Key, Rc<dyn Ownable>)>,
    {
        if self.seed.is_some() {
            self.conflicting_seed = true;
        } else {
            self.seed = Some(entries.into_iter().collect());
        }
        self
    }

    /// Build the container, inserting any seed entries through the normal
    /// insertion path.
    pub fn build(self) -> Result<DictContainer> {
        if self.conflicting_seed {
            return Err(ContainerError::ConflictingInit {
                container: self.name,
            });
        }
        let mut container = DictContainer::new(self.name, self.category);
        if let Some(sink) = self.sink {
            container.set_sink(sink);
        }
        if let Some(seed) = self.seed {
            container.update(seed)?;
        }
        Ok(container)
    }
}
