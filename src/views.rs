//! Read-only models handed to the presentation layer.
//! Built purely from accessors on [`Timetable`]; nothing here mutates state.

use serde::Serialize;

use crate::lists::ListKind;
use crate::schedule::{day_label, time_label, Slot, SlotIndex, DAYS, TIMES};
use crate::state::Timetable;

#[derive(Debug, Serialize)]
pub struct GridView {
    pub room: Option<String>,
    pub rooms: Vec<String>,
    pub days: Vec<&'static str>,
    pub rows: Vec<GridRow>,
}

impl GridView {
    pub fn is_room_selected(&self) -> bool {
        self.room.is_some()
    }
}

#[derive(Debug, Serialize)]
pub struct GridRow {
    pub time: &'static str,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Serialize)]
pub struct GridCell {
    pub day: usize,
    pub group: String,
    pub lecture: String,
    pub teacher: String,
    pub is_empty: bool,
}

#[derive(Debug, Serialize)]
pub struct ListView {
    pub kind: ListKind,
    pub items: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SlotEditorView {
    pub room: String,
    pub time: usize,
    pub day: usize,
    pub time_label: &'static str,
    pub day_label: &'static str,
    pub current: Slot,
    pub groups: Vec<String>,
    pub lectures: Vec<String>,
    pub teachers: Vec<String>,
}

/// Grid of `room`, or of the selected room when `room` is `None`.
/// Rooms that are not listed render without rows.
pub fn render_grid(timetable: &Timetable, room: Option<&str>) -> GridView {
    let rooms = timetable.list(ListKind::Rooms);
    let room = room
        .or_else(|| timetable.selected_room())
        .filter(|r| rooms.contains(r));

    let rows = match room {
        Some(room) => (0..TIMES.len())
            .map(|time| GridRow {
                time: time_label(time),
                cells: (0..DAYS.len())
                    .filter_map(|day| SlotIndex::new(time, day))
                    .map(|index| {
                        let slot = timetable.store().slot(room, index);
                        GridCell {
                            day: index.day(),
                            group: slot.group.clone(),
                            lecture: slot.lecture.clone(),
                            teacher: slot.teacher.clone(),
                            is_empty: slot.is_empty(),
                        }
                    })
                    .collect(),
            })
            .collect(),
        None => Vec::new(),
    };

    GridView {
        room: room.map(str::to_string),
        rooms: rooms.as_slice().to_vec(),
        days: DAYS.to_vec(),
        rows,
    }
}

pub fn render_list(timetable: &Timetable, kind: ListKind) -> ListView {
    ListView {
        kind,
        items: timetable
            .list(kind)
            .sorted()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

/// Editor for one cell. `None` when the room is not listed or the cell is out of range.
pub fn render_slot_editor(
    timetable: &Timetable,
    room: &str,
    time: usize,
    day: usize,
) -> Option<SlotEditorView> {
    if !timetable.list(ListKind::Rooms).contains(room) {
        return None;
    }
    let current = timetable.slot(room, time, day).ok()?.clone();
    let list = |kind| timetable.list(kind).as_slice().to_vec();

    Some(SlotEditorView {
        room: room.to_string(),
        time,
        day,
        time_label: time_label(time),
        day_label: day_label(day),
        current,
        groups: list(ListKind::Groups),
        lectures: list(ListKind::Lectures),
        teachers: list(ListKind::Teachers),
    })
}
