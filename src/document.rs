//! Conversion between a [`Timetable`] and the flat JSON document it is
//! persisted as.
//!
//! The document carries the four lists plus one `activities` entry per booked
//! cell. Loading is all-or-nothing: the first invalid activity rejects the
//! whole document, and [`load_or_empty`] turns that rejection into a fresh
//! empty timetable.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::DocumentError;
use crate::lists::{ListKind, ReferenceList};
use crate::schedule::{ScheduleStore, Slot, SlotIndex};
use crate::state::Timetable;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub groups: Vec<String>,
    pub lectures: Vec<String>,
    pub rooms: Vec<String>,
    pub teachers: Vec<String>,
    pub activities: Vec<Activity>,
}

/// One booked cell. `slot` is the time index, `day` the day index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub room: String,
    #[serde(deserialize_with = "integral")]
    pub slot: i64,
    #[serde(deserialize_with = "integral")]
    pub day: i64,
    pub group: String,
    pub lecture: String,
    pub teacher: String,
}

/// Accepts any JSON number without a fractional part, so `1.0` reads as `1`.
/// Integral values beyond `i64` saturate and fail the range check later.
fn integral<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 => Ok(value as i64),
        _ => Err(de::Error::custom(format!("expected an integer index, found {}", number))),
    }
}

impl Timetable {
    /// Flattens lists and all grids. Empty cells are omitted.
    pub fn to_document(&self) -> Document {
        let list = |kind| self.list(kind).as_slice().to_vec();

        let activities = self
            .store()
            .grids()
            .flat_map(|(room, grid)| {
                grid.booked().map(move |(index, slot)| Activity {
                    room: room.to_string(),
                    slot: index.time() as i64,
                    day: index.day() as i64,
                    group: slot.group.clone(),
                    lecture: slot.lecture.clone(),
                    teacher: slot.teacher.clone(),
                })
            })
            .collect();

        Document {
            groups: list(ListKind::Groups),
            lectures: list(ListKind::Lectures),
            rooms: list(ListKind::Rooms),
            teachers: list(ListKind::Teachers),
            activities,
        }
    }

    /// Rebuilds a timetable, rejecting the whole document on the first
    /// activity that references an unlisted value or an out-of-range cell.
    /// Later activities for the same cell overwrite earlier ones.
    pub fn from_document(doc: Document) -> Result<Timetable, DocumentError> {
        let groups = ReferenceList::from_values(doc.groups);
        let lectures = ReferenceList::from_values(doc.lectures);
        let rooms = ReferenceList::from_values(doc.rooms);
        let teachers = ReferenceList::from_values(doc.teachers);

        let mut store = ScheduleStore::new();
        for (index, activity) in doc.activities.into_iter().enumerate() {
            if !lectures.contains(&activity.lecture) {
                return Err(DocumentError::UnknownLecture { index, value: activity.lecture });
            }
            if !(0..crate::schedule::DAY_COUNT as i64).contains(&activity.day) {
                return Err(DocumentError::DayOutOfRange { index, day: activity.day });
            }
            if !groups.contains(&activity.group) {
                return Err(DocumentError::UnknownGroup { index, value: activity.group });
            }
            if !rooms.contains(&activity.room) {
                return Err(DocumentError::UnknownRoom { index, value: activity.room });
            }
            let cell = match SlotIndex::from_signed(activity.slot, activity.day) {
                Some(cell) => cell,
                None => return Err(DocumentError::SlotOutOfRange { index, slot: activity.slot }),
            };
            if !teachers.contains(&activity.teacher) {
                return Err(DocumentError::UnknownTeacher { index, value: activity.teacher });
            }

            store.set(
                &activity.room,
                cell,
                Slot {
                    group: activity.group,
                    lecture: activity.lecture,
                    teacher: activity.teacher,
                },
            );
        }

        Ok(Timetable::from_parts(rooms, groups, lectures, teachers, store))
    }
}

/// Parses and validates JSON text. Missing arrays, wrong element types and
/// fractional or non-numeric indices are reported as [`DocumentError::Malformed`].
pub fn parse(json: &str) -> Result<Timetable, DocumentError> {
    let doc: Document = serde_json::from_str(json)?;
    Timetable::from_document(doc)
}

/// Like [`parse`], but a rejected document yields an empty timetable
pub fn load_or_empty(json: &str) -> Timetable {
    match parse(json) {
        Ok(timetable) => timetable,
        Err(e) => {
            log::warn!("discarding persisted timetable: {}", e);
            Timetable::new()
        }
    }
}

pub fn to_json(timetable: &Timetable) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&timetable.to_document())
}
