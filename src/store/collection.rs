//! Id-keyed record collection backing every list entity in the store.

use chrono::{DateTime, Utc};

pub type RecordId = u32;

pub trait Record: Clone {
    fn id(&self) -> RecordId;

    /// Stamp `updatedAt`. Records without one ignore it.
    fn touch(&mut self, _at: DateTime<Utc>) {}
}

/// Records listed by their manual `displayOrder`.
pub trait Ordered: Record {
    fn display_order(&self) -> i32;
}

/// A partial update merged over an existing record.
pub trait Patch<T> {
    fn apply_to(self, target: &mut T);
}

/// Append-only id allocation: ids start at 1 and are never handed out twice,
/// even after the record holding one is removed.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    next_id: RecordId,
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Allocates the next id, builds the record with it and appends it.
    pub fn insert_with(&mut self, build: impl FnOnce(RecordId) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let record = build(id);
        self.items.push(record.clone());
        record
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn find_mut(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<&mut T> {
        self.items.iter_mut().find(|r| predicate(r))
    }

    /// Merges `patch` into the record and stamps it; `None` if the id is unknown.
    pub fn update<P: Patch<T>>(&mut self, id: RecordId, patch: P, now: DateTime<Utc>) -> Option<T> {
        let record = self.items.iter_mut().find(|r| r.id() == id)?;
        patch.apply_to(record);
        record.touch(now);
        Some(record.clone())
    }

    /// True when a record was actually removed.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id() != id);
        before > self.items.len()
    }
}

impl<T: Ordered> Collection<T> {
    /// Records sorted by `displayOrder`; ties keep insertion order.
    pub fn ordered(&self) -> Vec<T> {
        self.ordered_where(|_| true)
    }

    pub fn ordered_where(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut records: Vec<T> = self.items.iter().filter(|r| predicate(r)).cloned().collect();
        records.sort_by_key(|r| r.display_order());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: RecordId,
        label: &'static str,
        order: i32,
        touched: Option<DateTime<Utc>>,
    }

    impl Record for Item {
        fn id(&self) -> RecordId {
            self.id
        }

        fn touch(&mut self, at: DateTime<Utc>) {
            self.touched = Some(at);
        }
    }

    impl Ordered for Item {
        fn display_order(&self) -> i32 {
            self.order
        }
    }

    struct Relabel(&'static str);

    impl Patch<Item> for Relabel {
        fn apply_to(self, target: &mut Item) {
            target.label = self.0;
        }
    }

    fn push(c: &mut Collection<Item>, label: &'static str, order: i32) -> Item {
        c.insert_with(|id| Item {
            id,
            label,
            order,
            touched: None,
        })
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut c = Collection::new();
        let a = push(&mut c, "a", 0);
        let b = push(&mut c, "b", 0);
        assert_eq!((a.id, b.id), (1, 2));

        assert!(c.remove(b.id));
        let d = push(&mut c, "d", 0);
        assert_eq!(d.id, 3);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut c = Collection::new();
        let a = push(&mut c, "a", 0);
        push(&mut c, "b", 0);

        assert!(c.remove(a.id));
        assert_eq!(c.len(), 1);
        assert!(!c.remove(a.id));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_ordered_is_stable_for_duplicate_orders() {
        let mut c = Collection::new();
        push(&mut c, "late", 5);
        push(&mut c, "first-tie", 1);
        push(&mut c, "second-tie", 1);
        push(&mut c, "early", 0);

        let labels: Vec<_> = c.ordered().into_iter().map(|i| i.label).collect();
        assert_eq!(labels, ["early", "first-tie", "second-tie", "late"]);
    }

    #[test]
    fn test_update_merges_and_touches() {
        let mut c = Collection::new();
        let a = push(&mut c, "a", 0);
        let now = Utc::now();

        let updated = c.update(a.id, Relabel("renamed"), now).unwrap();
        assert_eq!(updated.label, "renamed");
        assert_eq!(updated.touched, Some(now));
        assert_eq!(c.get(a.id), Some(&updated));
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let mut c = Collection::new();
        let a = push(&mut c, "a", 0);

        assert!(c.update(99, Relabel("x"), Utc::now()).is_none());
        assert_eq!(c.get(a.id).unwrap().label, "a");
        assert_eq!(c.len(), 1);
    }
}
