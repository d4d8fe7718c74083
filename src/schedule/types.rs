use serde::{Deserialize, Serialize};

use super::slot_utils::{DAY_COUNT, TIME_COUNT};

/// Booking held by one timetable cell. All three fields empty means "no booking".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub group: String,
    pub lecture: String,
    pub teacher: String,
}

impl Slot {
    pub const EMPTY: Slot = Slot {
        group: String::new(),
        lecture: String::new(),
        teacher: String::new(),
    };

    pub fn new(
        group: impl Into<String>,
        lecture: impl Into<String>,
        teacher: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            lecture: lecture.into(),
            teacher: teacher.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.lecture.is_empty() && self.teacher.is_empty()
    }

    pub fn clear(&mut self) {
        self.group.clear();
        self.lecture.clear();
        self.teacher.clear();
    }

    /// Value of the referenced field
    pub fn field(&self, field: SlotField) -> &str {
        match field {
            SlotField::Group => &self.group,
            SlotField::Lecture => &self.lecture,
            SlotField::Teacher => &self.teacher,
        }
    }
}

/// Selects one of the reference-carrying fields of a [`Slot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotField {
    Group,
    Lecture,
    Teacher,
}

/// Position of a cell inside a [`Grid`]. Always in range once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex {
    time: usize,
    day: usize,
}

impl SlotIndex {
    /// Returns `None` unless `0 <= time < TIME_COUNT` and `0 <= day < DAY_COUNT`
    pub fn new(time: usize, day: usize) -> Option<Self> {
        if time < TIME_COUNT && day < DAY_COUNT {
            Some(Self { time, day })
        } else {
            None
        }
    }

    /// Same as [`SlotIndex::new`] for signed input coming from documents or URLs
    pub fn from_signed(time: i64, day: i64) -> Option<Self> {
        let time = usize::try_from(time).ok()?;
        let day = usize::try_from(day).ok()?;
        Self::new(time, day)
    }

    pub fn time(&self) -> usize {
        self.time
    }

    pub fn day(&self) -> usize {
        self.day
    }

    /// Every cell, time-major
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..TIME_COUNT).flat_map(|time| (0..DAY_COUNT).map(move |day| SlotIndex { time, day }))
    }
}

/// Weekly timetable of one room: `TIME_COUNT` rows by `DAY_COUNT` columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: [[Slot; DAY_COUNT]; TIME_COUNT],
}

impl Grid {
    pub fn get(&self, index: SlotIndex) -> &Slot {
        &self.cells[index.time][index.day]
    }

    pub fn get_mut(&mut self, index: SlotIndex) -> &mut Slot {
        &mut self.cells[index.time][index.day]
    }

    pub fn set(&mut self, index: SlotIndex, slot: Slot) {
        self.cells[index.time][index.day] = slot;
    }

    /// Non-empty cells with their positions
    pub fn booked(&self) -> impl Iterator<Item = (SlotIndex, &Slot)> {
        SlotIndex::all()
            .map(move |index| (index, self.get(index)))
            .filter(|(_, slot)| !slot.is_empty())
    }
}
