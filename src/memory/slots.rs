//! Slot register file
//!
//! Slots are numbered storage cells addressed by non-negative integers. The
//! map is sparse: a slot that was never written reads as `Number(0)`, and
//! reading never inserts.

use super::value::Value;
use rustc_hash::FxHashMap;

/// Slot key as parsed from the program
pub type SlotId = u64;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotFile {
    cells: FxHashMap<SlotId, Value>,
}

impl SlotFile {
    pub fn new() -> Self {
        SlotFile::default()
    }

    /// Read a slot, defaulting unset slots to `Number(0)`.
    pub fn get(&self, id: SlotId) -> Value {
        self.cells.get(&id).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, id: SlotId, value: Value) {
        self.cells.insert(id, value);
    }

    /// Store `value` in a slot and return what it held before.
    pub fn replace(&mut self, id: SlotId, value: Value) -> Value {
        self.cells.insert(id, value).unwrap_or_default()
    }

    /// Slots that have been written, ordered by id.
    pub fn sorted(&self) -> Vec<(SlotId, &Value)> {
        let mut entries: Vec<(SlotId, &Value)> =
            self.cells.iter().map(|(id, value)| (*id, value)).collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_slot_reads_zero() {
        let slots = SlotFile::new();
        assert_eq!(slots.get(42), Value::int(0));
        assert!(slots.is_empty());
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut slots = SlotFile::new();
        assert_eq!(slots.replace(1, Value::text("a")), Value::int(0));
        assert_eq!(slots.replace(1, Value::text("b")), Value::text("a"));
        assert_eq!(slots.get(1), Value::text("b"));
    }

    #[test]
    fn test_sorted_order() {
        let mut slots = SlotFile::new();
        slots.set(10, Value::int(1));
        slots.set(2, Value::int(2));
        let ids: Vec<SlotId> = slots.sorted().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![2, 10]);
    }
}
