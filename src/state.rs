use crate::error::MutationError;
use crate::lists::{ListKind, ReferenceList};
use crate::schedule::{invalidate, ScheduleStore, Slot, SlotIndex};

/// The whole editable timetable: four reference lists, the per-room grids
/// and the currently selected room.
///
/// Every mutation leaves the state consistent before it returns: removing a
/// group, lecture or teacher sweeps all grids, removing a room drops its grid,
/// and the selected room always names a listed room (or nothing when there
/// are no rooms).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    rooms: ReferenceList,
    groups: ReferenceList,
    lectures: ReferenceList,
    teachers: ReferenceList,
    store: ScheduleStore,
    selected_room: Option<String>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a timetable from already validated parts
    pub(crate) fn from_parts(
        rooms: ReferenceList,
        groups: ReferenceList,
        lectures: ReferenceList,
        teachers: ReferenceList,
        store: ScheduleStore,
    ) -> Self {
        let mut timetable = Self {
            rooms,
            groups,
            lectures,
            teachers,
            store,
            selected_room: None,
        };
        timetable.repair_selection();
        timetable
    }

    pub fn list(&self, kind: ListKind) -> &ReferenceList {
        match kind {
            ListKind::Rooms => &self.rooms,
            ListKind::Groups => &self.groups,
            ListKind::Lectures => &self.lectures,
            ListKind::Teachers => &self.teachers,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut ReferenceList {
        match kind {
            ListKind::Rooms => &mut self.rooms,
            ListKind::Groups => &mut self.groups,
            ListKind::Lectures => &mut self.lectures,
            ListKind::Teachers => &mut self.teachers,
        }
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn selected_room(&self) -> Option<&str> {
        self.selected_room.as_deref()
    }

    /// Adds `value` to a list. Empty and duplicate values are dropped.
    pub fn add(&mut self, kind: ListKind, value: &str) -> bool {
        let added = self.list_mut(kind).add(value);
        if added {
            log::info!("added '{}' to {}", value, kind);
        }
        if kind == ListKind::Rooms {
            self.repair_selection();
        }
        added
    }

    /// Removes `value` from a list and restores referential integrity.
    /// Removing an absent value changes nothing.
    pub fn remove(&mut self, kind: ListKind, value: &str) -> bool {
        if !self.list_mut(kind).remove(value) {
            return false;
        }
        log::info!("removed '{}' from {}", value, kind);

        match kind.slot_field() {
            Some(field) => {
                let store = std::mem::take(&mut self.store);
                self.store = invalidate(store, field, self.list(kind));
            }
            None => {
                self.store.remove_room(value);
                if self.selected_room.as_deref() == Some(value) {
                    self.selected_room = None;
                }
                self.repair_selection();
            }
        }
        true
    }

    /// Makes `room` the current view. Unknown rooms are rejected and the selection is kept.
    pub fn select_room(&mut self, room: &str) -> Result<(), MutationError> {
        if !self.rooms.contains(room) {
            return Err(MutationError::UnknownRoom(room.to_string()));
        }
        self.selected_room = Some(room.to_string());
        Ok(())
    }

    /// Reads one cell. Unknown rooms and unbooked cells both read as empty.
    pub fn slot(&self, room: &str, time: usize, day: usize) -> Result<&Slot, MutationError> {
        let index = Self::index(time, day)?;
        Ok(self.store.slot(room, index))
    }

    /// Books a cell. All references must be listed, otherwise nothing changes.
    pub fn set_slot(
        &mut self,
        room: &str,
        time: usize,
        day: usize,
        slot: Slot,
    ) -> Result<(), MutationError> {
        let index = self.checked_cell(room, time, day)?;
        if slot.is_empty() {
            self.store.clear(room, index);
            return Ok(());
        }
        if !self.groups.contains(&slot.group) {
            return Err(MutationError::UnknownGroup(slot.group));
        }
        if !self.lectures.contains(&slot.lecture) {
            return Err(MutationError::UnknownLecture(slot.lecture));
        }
        if !self.teachers.contains(&slot.teacher) {
            return Err(MutationError::UnknownTeacher(slot.teacher));
        }
        self.store.set(room, index, slot);
        Ok(())
    }

    /// Empties a cell. Clearing an empty cell is fine.
    pub fn clear_slot(&mut self, room: &str, time: usize, day: usize) -> Result<(), MutationError> {
        let index = self.checked_cell(room, time, day)?;
        self.store.clear(room, index);
        Ok(())
    }

    fn checked_cell(
        &self,
        room: &str,
        time: usize,
        day: usize,
    ) -> Result<SlotIndex, MutationError> {
        if !self.rooms.contains(room) {
            return Err(MutationError::UnknownRoom(room.to_string()));
        }
        Self::index(time, day)
    }

    fn index(time: usize, day: usize) -> Result<SlotIndex, MutationError> {
        SlotIndex::new(time, day).ok_or(MutationError::OutOfRange {
            time: i64::try_from(time).unwrap_or(i64::MAX),
            day: i64::try_from(day).unwrap_or(i64::MAX),
        })
    }

    fn repair_selection(&mut self) {
        if let Some(room) = &self.selected_room {
            if !self.rooms.contains(room) {
                self.selected_room = None;
            }
        }
        if self.selected_room.is_none() {
            self.selected_room = self.rooms.first().map(str::to_string);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Timetable {
        let mut t = Timetable::new();
        t.add(ListKind::Rooms, "R1");
        t.add(ListKind::Groups, "G1");
        t.add(ListKind::Lectures, "L1");
        t.add(ListKind::Teachers, "T1");
        t
    }

    #[test]
    fn removing_group_clears_its_bookings() {
        let mut t = seeded();
        t.set_slot("R1", 0, 0, Slot::new("G1", "L1", "T1")).unwrap();
        assert!(!t.slot("R1", 0, 0).unwrap().is_empty());

        assert!(t.remove(ListKind::Groups, "G1"));
        assert_eq!(t.slot("R1", 0, 0).unwrap(), &Slot::new("", "", ""));
    }

    #[test]
    fn removed_value_never_survives_in_any_room() {
        let mut t = seeded();
        t.add(ListKind::Rooms, "R2");
        t.add(ListKind::Teachers, "T2");
        t.set_slot("R1", 2, 1, Slot::new("G1", "L1", "T2")).unwrap();
        t.set_slot("R2", 5, 3, Slot::new("G1", "L1", "T2")).unwrap();
        t.set_slot("R2", 6, 3, Slot::new("G1", "L1", "T1")).unwrap();

        t.remove(ListKind::Teachers, "T2");

        for (_, grid) in t.store().grids() {
            assert!(grid.booked().all(|(_, slot)| slot.teacher != "T2"));
        }
        assert_eq!(t.slot("R2", 6, 3).unwrap().teacher, "T1");
    }

    #[test]
    fn set_with_unknown_reference_changes_nothing() {
        let mut t = seeded();
        t.set_slot("R1", 1, 1, Slot::new("G1", "L1", "T1")).unwrap();
        let before = t.clone();

        assert_eq!(
            t.set_slot("R1", 1, 1, Slot::new("G9", "L1", "T1")),
            Err(MutationError::UnknownGroup("G9".into()))
        );
        assert_eq!(
            t.set_slot("R1", 1, 1, Slot::new("G1", "L1", "T9")),
            Err(MutationError::UnknownTeacher("T9".into()))
        );
        assert!(t.set_slot("R9", 1, 1, Slot::new("G1", "L1", "T1")).is_err());
        assert!(t.set_slot("R1", 9, 1, Slot::new("G1", "L1", "T1")).is_err());
        assert!(t.set_slot("R1", 1, 5, Slot::new("G1", "L1", "T1")).is_err());
        assert_eq!(t, before);
    }

    #[test]
    fn read_never_fails_in_range() {
        let t = Timetable::new();
        for time in 0..9 {
            for day in 0..5 {
                assert!(t.slot("nowhere", time, day).unwrap().is_empty());
            }
        }
        assert!(t.slot("nowhere", 9, 0).is_err());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut t = seeded();
        t.set_slot("R1", 4, 4, Slot::new("G1", "L1", "T1")).unwrap();
        t.clear_slot("R1", 4, 4).unwrap();
        t.clear_slot("R1", 4, 4).unwrap();
        assert!(t.slot("R1", 4, 4).unwrap().is_empty());
    }

    #[test]
    fn removing_room_drops_grid_and_moves_selection() {
        let mut t = seeded();
        t.add(ListKind::Rooms, "R2");
        assert_eq!(t.selected_room(), Some("R1"));
        t.set_slot("R1", 0, 0, Slot::new("G1", "L1", "T1")).unwrap();

        t.remove(ListKind::Rooms, "R1");
        assert!(t.store().grid("R1").is_none());
        assert_eq!(t.selected_room(), Some("R2"));

        t.remove(ListKind::Rooms, "R2");
        assert_eq!(t.selected_room(), None);

        // a re-added room starts with a blank grid
        t.add(ListKind::Rooms, "R1");
        assert!(t.slot("R1", 0, 0).unwrap().is_empty());
        assert_eq!(t.selected_room(), Some("R1"));
    }

    #[test]
    fn select_room_requires_listed_room() {
        let mut t = seeded();
        t.add(ListKind::Rooms, "R2");
        t.select_room("R2").unwrap();
        assert_eq!(t.selected_room(), Some("R2"));
        assert!(t.select_room("R3").is_err());
        assert_eq!(t.selected_room(), Some("R2"));
    }

    #[test]
    fn removing_absent_value_is_noop() {
        let mut t = seeded();
        let before = t.clone();
        assert!(!t.remove(ListKind::Lectures, "L9"));
        assert_eq!(t, before);
    }
}
