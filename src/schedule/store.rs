use std::collections::BTreeMap;

use super::types::{Grid, Slot, SlotIndex};

static EMPTY_SLOT: Slot = Slot::EMPTY;

/// Per-room grids. A room without a grid reads as fully empty; grids are
/// only materialized on write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleStore {
    grids: BTreeMap<String, Grid>, // room -> grid
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one cell. Never inserts anything.
    pub fn slot(&self, room: &str, index: SlotIndex) -> &Slot {
        self.grids
            .get(room)
            .map(|grid| grid.get(index))
            .unwrap_or(&EMPTY_SLOT)
    }

    pub fn grid(&self, room: &str) -> Option<&Grid> {
        self.grids.get(room)
    }

    /// Grid for `room`, created empty if it does not exist yet
    pub fn grid_mut(&mut self, room: &str) -> &mut Grid {
        self.grids.entry(room.to_string()).or_default()
    }

    pub fn set(&mut self, room: &str, index: SlotIndex, slot: Slot) {
        self.grid_mut(room).set(index, slot);
    }

    /// Clearing a cell of a room that has no grid is a no-op
    pub fn clear(&mut self, room: &str, index: SlotIndex) {
        if let Some(grid) = self.grids.get_mut(room) {
            grid.get_mut(index).clear();
        }
    }

    /// Drops the grid of `room`. Returns whether one existed.
    pub fn remove_room(&mut self, room: &str) -> bool {
        self.grids.remove(room).is_some()
    }

    /// Rooms that currently own a grid, sorted
    pub fn rooms(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }

    pub fn grids(&self) -> impl Iterator<Item = (&str, &Grid)> {
        self.grids.iter().map(|(room, grid)| (room.as_str(), grid))
    }

    pub fn grids_mut(&mut self) -> impl Iterator<Item = (&str, &mut Grid)> {
        self.grids.iter_mut().map(|(room, grid)| (room.as_str(), grid))
    }

    /// Number of non-empty cells across all rooms
    pub fn booked_count(&self) -> usize {
        self.grids.values().map(|grid| grid.booked().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(time: usize, day: usize) -> SlotIndex {
        SlotIndex::new(time, day).unwrap()
    }

    #[test]
    fn read_before_write_is_empty_and_does_not_insert() {
        let store = ScheduleStore::new();
        for index in SlotIndex::all() {
            assert!(store.slot("R1", index).is_empty());
        }
        assert!(store.grid("R1").is_none());
        assert_eq!(store.rooms().count(), 0);
    }

    #[test]
    fn write_materializes_grid() {
        let mut store = ScheduleStore::new();
        store.set("R1", idx(3, 2), Slot::new("G1", "L1", "T1"));

        assert_eq!(store.slot("R1", idx(3, 2)), &Slot::new("G1", "L1", "T1"));
        assert!(store.slot("R1", idx(2, 3)).is_empty());
        assert_eq!(store.rooms().collect::<Vec<_>>(), vec!["R1"]);
        assert_eq!(store.booked_count(), 1);
    }

    #[test]
    fn clear_on_missing_room_is_noop() {
        let mut store = ScheduleStore::new();
        store.clear("R1", idx(0, 0));
        assert!(store.grid("R1").is_none());

        store.set("R1", idx(0, 0), Slot::new("G1", "L1", "T1"));
        store.clear("R1", idx(0, 0));
        store.clear("R1", idx(0, 0));
        assert!(store.slot("R1", idx(0, 0)).is_empty());
    }

    #[test]
    fn remove_room_drops_grid() {
        let mut store = ScheduleStore::new();
        store.set("R1", idx(0, 0), Slot::new("G1", "L1", "T1"));
        assert!(store.remove_room("R1"));
        assert!(!store.remove_room("R1"));
        assert!(store.slot("R1", idx(0, 0)).is_empty());
    }

    #[test]
    fn index_bounds() {
        assert!(SlotIndex::new(8, 4).is_some());
        assert!(SlotIndex::new(9, 0).is_none());
        assert!(SlotIndex::new(0, 5).is_none());
        assert!(SlotIndex::from_signed(-1, 0).is_none());
        assert_eq!(SlotIndex::all().count(), 45);
    }
}
