//! Nested container storage
//!
//! A component tree is hierarchical: a sub-model's container can itself be
//! stored as an entry of its parent's container, provided the categories
//! match. [`NestedContainer`] is the adapter that makes a
//! [`DictContainer`] ownable: it wraps the container behind a `RefCell` so
//! the wrapped container stays mutable while the adapter is shared through
//! an `Rc`.

use crate::container::dict::DictContainer;
use crate::container::item::{Category, ContainerTag, Ownable, OwnerLink};
use crate::container::key::Key;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// An ownable wrapper around a [`DictContainer`].
///
/// The adapter's category is the wrapped container's declared category, so
/// a nested container can only be stored under a parent declared with the
/// same category.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use catmap_rs::container::dict::DictContainer;
/// use catmap_rs::container::item::{Category, LeafItem, Ownable};
/// use catmap_rs::container::nested::NestedContainer;
///
/// const VARIABLE: Category = Category::new("V");
///
/// let mut model = DictContainer::new("model", VARIABLE);
/// let sub = Rc::new(NestedContainer::new(DictContainer::new("sub", VARIABLE)));
///
/// model.insert("sub", sub.clone()).unwrap();
/// assert_eq!(sub.owner().unwrap().name(), "model");
///
/// sub.borrow_mut()
///     .insert("x", Rc::new(LeafItem::new("x", VARIABLE)))
///     .unwrap();
/// assert_eq!(sub.borrow().len(), 1);
/// ```
#[derive(Debug)]
pub struct NestedContainer {
    inner: RefCell<DictContainer>,
    link: OwnerLink,
}

impl NestedContainer {
    /// Wrap `container` so it can be stored as a child of another
    /// container.
    pub fn new(container: DictContainer) -> Self {
        Self {
            inner: RefCell::new(container),
            link: OwnerLink::new(),
        }
    }

    /// Borrow the wrapped container immutably.
    ///
    /// # Panics
    ///
    /// Panics if the container is currently borrowed mutably.
    pub fn borrow(&self) -> Ref<'_, DictContainer> {
        self.inner.borrow()
    }

    /// Borrow the wrapped container mutably.
    ///
    /// # Panics
    ///
    /// Panics if the container is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, DictContainer> {
        self.inner.borrow_mut()
    }
}

impl Ownable for NestedContainer {
    fn category(&self) -> Category {
        self.inner.borrow().category()
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
