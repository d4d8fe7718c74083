use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::lists::ListKind;
use crate::schedule::{day_label, time_label, SlotIndex, DAYS, TIMES};
use crate::state::Timetable;

/// Formats a booking as "group / lecture / teacher"
pub fn format_booking(group: &str, lecture: &str, teacher: &str) -> String {
    format!("{} / {} / {}", group, lecture, teacher)
}

/// Writes the timetable of one room in the format: `Day HH:MM-HH:MM booking`
pub fn write_grid<W: Write>(out: &mut W, timetable: &Timetable, room: &str) -> io::Result<()> {
    writeln!(out, "** {} **", room)?;

    for day in 0..DAYS.len() {
        writeln!(out, "{}", day_label(day))?;
        for time in 0..TIMES.len() {
            let Some(index) = SlotIndex::new(time, day) else {
                continue;
            };
            let slot = timetable.store().slot(room, index);
            if slot.is_empty() {
                writeln!(out, "  {} [EMPTY]", time_label(time))?;
            } else {
                writeln!(
                    out,
                    "  {} {}",
                    time_label(time),
                    format_booking(&slot.group, &slot.lecture, &slot.teacher)
                )?;
            }
        }
    }

    Ok(())
}

pub fn write_grid_to_file<P: AsRef<Path>>(
    timetable: &Timetable,
    room: &str,
    path: P,
) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_grid(&mut file, timetable, room)
}

/// Prints one room, or every listed room when `room` is `None`
pub fn print_grid(timetable: &Timetable, room: Option<&str>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let rooms: Vec<&str> = match room {
        Some(room) => vec![room],
        None => timetable.list(ListKind::Rooms).iter().collect(),
    };
    for room in rooms {
        write_grid(&mut out, timetable, room)?;
        writeln!(out)?;
    }

    Ok(())
}

/// Prints every reference list with its size
pub fn print_lists(timetable: &Timetable) {
    for kind in ListKind::ALL {
        let list = timetable.list(kind);
        println!("{} ({}): {}", kind, list.len(), list.sorted().join(", "));
    }
    println!("booked slots: {}", timetable.store().booked_count());
}
