//! Field-level change tracking shared by mutable domain entities.
//!
//! Entities describe each tracked field as a variant of a value enum that
//! implements [`TrackedValue`]. Setters hand the previous and next value to
//! [`ChangeLedger::record`]; the ledger keeps the first-seen original and the
//! latest value per field. Persistence adapters read the ledger to perform
//! dirty-field-only writes, and entities drain it to roll back.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

/// A field value that can be recorded in a [`ChangeLedger`].
///
/// Every value knows which field it belongs to, so an entity's setter and the
/// ledger agree on the key without name-based lookups.
pub trait TrackedValue: Clone + PartialEq + fmt::Debug {
    /// Identifier of the field the value belongs to.
    type Field: Copy + Ord + fmt::Debug + fmt::Display;

    /// The field this value is stored in.
    fn field(&self) -> Self::Field;
}

/// Original and latest value recorded for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange<V> {
    original: V,
    current: V,
}

impl<V> FieldChange<V> {
    /// Value the field held before its first recorded change.
    pub fn original(&self) -> &V {
        &self.original
    }

    /// Most recently assigned value.
    pub fn current(&self) -> &V {
        &self.current
    }
}

/// Per-entity record of modified fields.
///
/// ## Invariants
/// - A field appears at most once.
/// - `original` is the value before the first differing assignment since the
///   ledger was last cleared.
///
/// # Examples
/// ```
/// use blog_backend::domain::{ChangeLedger, PostField, PostValue};
///
/// let mut ledger = ChangeLedger::default();
/// ledger.record(PostValue::Title("a".into()), PostValue::Title("b".into()));
/// ledger.record(PostValue::Title("b".into()), PostValue::Title("c".into()));
///
/// let change = ledger.get(PostField::Title).expect("title recorded");
/// assert_eq!(change.original(), &PostValue::Title("a".into()));
/// assert_eq!(change.current(), &PostValue::Title("c".into()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeLedger<V: TrackedValue> {
    entries: BTreeMap<V::Field, FieldChange<V>>,
}

impl<V: TrackedValue> Default for ChangeLedger<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V: TrackedValue> ChangeLedger<V> {
    /// Record an assignment from `previous` to `next`.
    ///
    /// Returns `false` and records nothing when the values are equal.
    pub fn record(&mut self, previous: V, next: V) -> bool {
        debug_assert_eq!(previous.field(), next.field());
        if previous == next {
            return false;
        }
        match self.entries.entry(next.field()) {
            Entry::Occupied(mut slot) => slot.get_mut().current = next,
            Entry::Vacant(slot) => {
                slot.insert(FieldChange {
                    original: previous,
                    current: next,
                });
            }
        }
        true
    }

    /// Whether no field has been modified.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of modified fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether `field` has been modified.
    pub fn contains(&self, field: V::Field) -> bool {
        self.entries.contains_key(&field)
    }

    /// Recorded change for `field`, if any.
    pub fn get(&self, field: V::Field) -> Option<&FieldChange<V>> {
        self.entries.get(&field)
    }

    /// Modified fields in their declaration order.
    pub fn fields(&self) -> impl Iterator<Item = V::Field> + '_ {
        self.entries.keys().copied()
    }

    /// Latest value of every modified field.
    pub fn current_values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values().map(FieldChange::current)
    }

    /// Forget every recorded change.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Empty the ledger, returning the original value of each modified field.
    pub fn take_originals(&mut self) -> Vec<V> {
        std::mem::take(&mut self.entries)
            .into_values()
            .map(|change| change.original)
            .collect()
    }
}
