use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::display::format_booking;
use crate::schedule::{time_label, SlotIndex, DAYS, TIMES};
use crate::state::Timetable;

/// Writes the grid of `room` as CSV: a header of weekdays, then one row per period.
/// Unbooked cells are left blank.
pub fn write_grid_csv<W: Write>(
    timetable: &Timetable,
    room: &str,
    out: W,
) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);

    let mut header = vec![room.to_string()];
    header.extend(DAYS.iter().map(|d| d.to_string()));
    wtr.write_record(&header)?;

    for time in 0..TIMES.len() {
        let mut record = vec![time_label(time).to_string()];
        for day in 0..DAYS.len() {
            let cell = SlotIndex::new(time, day)
                .map(|index| timetable.store().slot(room, index))
                .filter(|slot| !slot.is_empty())
                .map(|slot| format_booking(&slot.group, &slot.lecture, &slot.teacher))
                .unwrap_or_default();
            record.push(cell);
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the grid of `room` to a CSV file, replacing any existing file
pub fn export_grid_to_csv<P: AsRef<Path>>(
    timetable: &Timetable,
    room: &str,
    csv_path: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(csv_path)?;
    write_grid_csv(timetable, room, file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::ListKind;
    use crate::schedule::Slot;

    #[test]
    fn csv_has_header_and_nine_rows() {
        let mut t = Timetable::new();
        t.add(ListKind::Rooms, "R1");
        t.add(ListKind::Groups, "G1");
        t.add(ListKind::Lectures, "Maths, advanced");
        t.add(ListKind::Teachers, "T1");
        t.set_slot("R1", 2, 4, Slot::new("G1", "Maths, advanced", "T1")).unwrap();

        let mut out = Vec::new();
        write_grid_csv(&t, "R1", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "R1,Monday,Tuesday,Wednesday,Thursday,Friday");
        assert_eq!(lines[1], "08:00-08:45,,,,,");
        assert_eq!(lines[3], "09:50-10:35,,,,,\"G1 / Maths, advanced / T1\"");
    }
}
