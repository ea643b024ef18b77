//! Pluggable diagnostic sinks
//!
//! Implicitly replacing an occupied entry is not an error, but it is almost
//! always a modeling mistake, so the container reports it through a
//! [`DiagnosticSink`] instead of failing. The sink is a collaborator: the
//! container never hardcodes a logging call, it only hands the event to
//! whatever sink it was configured with. [`TracingSink`] is the default;
//! [`CollectingSink`] records events for inspection and is what the test
//! suite uses.

use crate::container::item::{Category, ContainerTag, Ownable};
use crate::container::key::Key;
use std::cell::RefCell;
use std::rc::Rc;

/// An implicit replacement observed by a container.
///
/// Fired by `insert` when an unattached item is assigned to a key that
/// already holds a different item. The displaced item has already passed
/// the category check when it was inserted, so `displaced.category()`
/// always equals the container's declared category.
pub struct ReplacementEvent<'a> {
    /// The container performing the replacement.
    pub container: &'a ContainerTag,

    /// The key being reassigned.
    pub key: &'a Key,

    /// The item being displaced; still attached to the container when the
    /// sink runs, detached immediately after.
    pub displaced: &'a Rc<dyn Ownable>,

    /// The item taking the slot.
    pub incoming: &'a Rc<dyn Ownable>,
}

/// Receiver for container diagnostics.
///
/// Implementations decide what to do with the event: log it, queue it,
/// count it, or ignore it.
pub trait DiagnosticSink {
    /// Called once per implicit replacement, before the container mutates.
    fn implicit_replacement(&self, event: &ReplacementEvent<'_>);
}

/// The default sink: emits a `tracing` warning for each implicit
/// replacement, in the spirit of the usual "delete before reassigning"
/// modeling advice.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn implicit_replacement(&self, event: &ReplacementEvent<'_>) {
        tracing::warn!(
            container = event.container.name(),
            key = %event.key,
            category = %event.displaced.category(),
            "implicitly replacing the entry {} with a new object; this is \
             usually indicative of a modeling error. To avoid this warning, \
             delete the original object from the container before assigning \
             a new object.",
            event.container.child_name(event.key),
        );
    }
}

/// An owned record of a replacement event, kept by [`CollectingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReplacementRecord {
    /// Name of the container that performed the replacement
    pub container: String,

    /// The key that was reassigned
    pub key: Key,

    /// Category of the displaced item
    pub category: Category,
}

/// A sink that records every event, for callers who want an event stream
/// rather than log output.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use catmap_rs::container::diagnostics::CollectingSink;
///
/// let sink = Rc::new(CollectingSink::new());
/// assert!(sink.take().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: RefCell<Vec<ReplacementRecord>>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events recorded so far.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Drain and return all recorded events.
    pub fn take(&self) -> Vec<ReplacementRecord> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn implicit_replacement(&self, event: &ReplacementEvent<'_>) {
        self.events.borrow_mut().push(ReplacementRecord {
            container: event.container.name().to_string(),
            key: event.key.clone(),
            category: event.displaced.category(),
        });
    }
}
