//! The ownable-item contract
//!
//! Anything stored in a [`DictContainer`](crate::container::dict::DictContainer)
//! must implement [`Ownable`]: it carries an immutable [`Category`] tag, a
//! weak back-reference to the container currently holding it, and the key
//! under which that container indexes it. The back-reference is a pure
//! lookup relation. It never extends the container's lifetime, and it is
//! only ever written through [`Ownable::attach`] and [`Ownable::detach`] at
//! the holding container's request.
//!
//! Implementors embed an [`OwnerLink`] and delegate the four owner-relation
//! methods to it; [`LeafItem`] is the reference implementation.

use crate::container::key::Key;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A tag classifying which items a container may hold.
///
/// Each concrete item type declares its category as a constant; two items
/// are compatible iff their categories compare equal. Comparison is by
/// value, so independent declarations of the same tag string are the same
/// category.
///
/// # Examples
///
/// ```
/// use catmap_rs::container::item::Category;
///
/// const VARIABLE: Category = Category::new("V");
/// const CONSTRAINT: Category = Category::new("C");
///
/// assert_eq!(VARIABLE, Category::new("V"));
/// assert_ne!(VARIABLE, CONSTRAINT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Category(&'static str);

impl Category {
    /// Create a category from its tag string.
    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    /// The tag string of this category.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity of a container, as seen by the items it holds.
///
/// A container keeps its tag in an `Rc` and hands items a `Weak` reference
/// to it, so an item's `owner` relation can be compared by identity and
/// reported by name without keeping the container alive.
#[derive(Debug)]
pub struct ContainerTag {
    name: String,
    category: Category,
}

impl ContainerTag {
    pub(crate) fn new(name: impl Into<String>, category: Category) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            category,
        })
    }

    /// The container's name, used in error and diagnostic text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The container's declared category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Render the name of the child stored at `key`, e.g. `model[2]`.
    pub fn child_name(&self, key: &Key) -> String {
        format!("{}[{}]", self.name, key)
    }
}

/// The owner relation of an ownable item.
///
/// `OwnerLink` implements the attach/detach mechanics once so concrete item
/// types only delegate to it. The link holds the owning container's tag
/// weakly together with the storage key; a link whose `Weak` no longer
/// upgrades reads as unattached.
#[derive(Debug, Default)]
pub struct OwnerLink {
    slot: RefCell<Option<(Weak<ContainerTag>, Key)>>,
}

impl OwnerLink {
    /// Create an unattached link.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tag of the container currently holding the item, if any.
    pub fn owner(&self) -> Option<Rc<ContainerTag>> {
        self.slot.borrow().as_ref().and_then(|(weak, _)| weak.upgrade())
    }

    /// The key under which the owner indexes the item; `None` when
    /// unattached.
    pub fn storage_key(&self) -> Option<Key> {
        match self.slot.borrow().as_ref() {
            Some((weak, key)) if weak.upgrade().is_some() => Some(key.clone()),
            _ => None,
        }
    }

    /// Point the link at `owner` under `key`.
    pub fn attach(&self, owner: &Rc<ContainerTag>, key: Key) {
        *self.slot.borrow_mut() = Some((Rc::downgrade(owner), key));
    }

    /// Clear the link.
    pub fn detach(&self) {
        *self.slot.borrow_mut() = None;
    }
}

/// The contract a value must satisfy to be stored in a categorized
/// container.
///
/// `category` is immutable per item; `owner` and `storage_key` describe the
/// single container currently holding the item. `attach` and `detach` are
/// the only legal ways the owner relation changes, and only the holding
/// container calls them. User code reads the relation but never writes it.
pub trait Ownable: fmt::Debug {
    /// The item's immutable category tag.
    fn category(&self) -> Category;

    /// The container currently holding this item, or `None` if unattached.
    fn owner(&self) -> Option<Rc<ContainerTag>>;

    /// The key under which the owner indexes this item, or `None` if
    /// unattached.
    fn storage_key(&self) -> Option<Key>;

    /// Record `owner`/`key` as the item's current holder. Called by the
    /// container during insertion.
    fn attach(&self, owner: &Rc<ContainerTag>, key: Key);

    /// Clear the owner relation. Called by the container during removal,
    /// replacement, and disposal.
    fn detach(&self);
}

/// A minimal ownable item: a named leaf with a fixed category.
///
/// This is the reference implementation of the [`Ownable`] contract and the
/// shape most modeling leaves (a parameter, a scalar variable) take: a
/// category constant plus an embedded [`OwnerLink`].
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use catmap_rs::container::item::{Category, LeafItem, Ownable};
///
/// const VARIABLE: Category = Category::new("V");
///
/// let x = Rc::new(LeafItem::new("x", VARIABLE));
/// assert_eq!(x.name(), "x");
/// assert_eq!(x.category(), VARIABLE);
/// assert!(x.owner().is_none());
/// ```
#[derive(Debug)]
pub struct LeafItem {
    name: String,
    category: Category,
    link: OwnerLink,
}

impl LeafItem {
    /// Create an unattached leaf item with the given name and category.
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            link: OwnerLink::new(),
        }
    }

    /// The item's own name (distinct from the key it is stored under).
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Ownable for LeafItem {
    fn category(&self) -> Category {
        self.category
    }

    fn owner(&self) -> Option<Rc<ContainerTag>> {
        self.link.owner()
    }

    fn storage_key(&self) -> Option<Key> {
        self.link.storage_key()
    }

    fn attach(&self, owner: &Rc<ContainerTag>, key: Key) {
        self.link.attach(owner, key);
    }

    fn detach(&self) {
        self.link.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V: Category = Category::new("V");

    #[test]
    fn test_owner_link_round_trip() {
        let tag = ContainerTag::new("model", V);
        let link = OwnerLink::new();
        assert!(link.owner().is_none());
        assert!(link.storage_key().is_none());

        link.attach(&tag, Key::from(7));
        assert!(Rc::ptr_eq(&link.owner().unwrap(), &tag));
        assert_eq!(link.storage_key(), Some(Key::from(7)));

        link.detach();
        assert!(link.owner().is_none());
        assert!(link.storage_key().is_none());
    }

    #[test]
    fn test_stale_link_reads_as_unattached() {
        let link = OwnerLink::new();
        {
            let tag = ContainerTag::new("ephemeral", V);
            link.attach(&tag, Key::from(0));
            assert!(link.owner().is_some());
        }
        // The tag is gone; the link must not report a dead owner.
        assert!(link.owner().is_none());
        assert!(link.storage_key().is_none());
    }

    #[test]
    fn test_child_name_rendering() {
        let tag = ContainerTag::new("block", V);
        assert_eq!(tag.child_name(&Key::from(3)), "block[3]");
        assert_eq!(tag.child_name(&Key::from((1, 2))), "block[(1, 2)]");
    }
}
