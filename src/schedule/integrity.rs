use crate::lists::ReferenceList;

use super::store::ScheduleStore;
use super::types::{SlotField, SlotIndex};

/// Clears every booked cell, in every room, whose `field` no longer names an
/// entry of `valid`. Runs over the whole store each time and is idempotent.
pub fn invalidate(
    mut store: ScheduleStore,
    field: SlotField,
    valid: &ReferenceList,
) -> ScheduleStore {
    let mut cleared = 0usize;

    for (room, grid) in store.grids_mut() {
        for index in SlotIndex::all() {
            let slot = grid.get_mut(index);
            if slot.is_empty() || valid.contains(slot.field(field)) {
                continue;
            }
            log::debug!(
                "clearing {} slot ({}, {}) in room {}: {:?} is no longer listed",
                field_name(field),
                index.time(),
                index.day(),
                room,
                slot.field(field)
            );
            slot.clear();
            cleared += 1;
        }
    }

    if cleared > 0 {
        log::debug!("invalidated {} slot(s) by {}", cleared, field_name(field));
    }
    store
}

fn field_name(field: SlotField) -> &'static str {
    match field {
        SlotField::Group => "group",
        SlotField::Lecture => "lecture",
        SlotField::Teacher => "teacher",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Slot;

    fn idx(time: usize, day: usize) -> SlotIndex {
        SlotIndex::new(time, day).unwrap()
    }

    fn sample_store() -> ScheduleStore {
        let mut store = ScheduleStore::new();
        store.set("R1", idx(0, 0), Slot::new("G1", "L1", "T1"));
        store.set("R1", idx(1, 0), Slot::new("G2", "L1", "T1"));
        store.set("R2", idx(8, 4), Slot::new("G1", "L2", "T2"));
        store.set("R3", idx(4, 2), Slot::new("G2", "L2", "T2"));
        store
    }

    #[test]
    fn clears_cells_in_every_room() {
        let groups = ReferenceList::from_values(["G2"]);
        let store = invalidate(sample_store(), SlotField::Group, &groups);

        assert!(store.slot("R1", idx(0, 0)).is_empty());
        assert!(store.slot("R2", idx(8, 4)).is_empty());
        assert_eq!(store.slot("R1", idx(1, 0)).group, "G2");
        assert_eq!(store.slot("R3", idx(4, 2)).group, "G2");
        assert_eq!(store.booked_count(), 2);
    }

    #[test]
    fn is_idempotent() {
        let teachers = ReferenceList::from_values(["T1"]);
        let once = invalidate(sample_store(), SlotField::Teacher, &teachers);
        let twice = invalidate(once.clone(), SlotField::Teacher, &teachers);
        assert_eq!(once, twice);
        assert_eq!(twice.booked_count(), 2);
    }

    #[test]
    fn empty_list_clears_everything() {
        let store = invalidate(sample_store(), SlotField::Lecture, &ReferenceList::new());
        assert_eq!(store.booked_count(), 0);
        // grids survive, only their cells are cleared
        assert_eq!(store.rooms().count(), 3);
    }

    #[test]
    fn leaves_unrelated_fields_alone() {
        let lectures = ReferenceList::from_values(["L1", "L2"]);
        let store = invalidate(sample_store(), SlotField::Lecture, &lectures);
        assert_eq!(store, sample_store());
    }
}
