/// Lesson periods, one row of every grid each
pub const TIMES: [&str; 9] = [
    "08:00-08:45",
    "08:55-09:40",
    "09:50-10:35",
    "10:55-11:40",
    "11:50-12:35",
    "12:45-13:30",
    "13:40-14:25",
    "14:35-15:20",
    "15:30-16:15",
];

/// Weekdays, one column of every grid each
pub const DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub const TIME_COUNT: usize = TIMES.len();
pub const DAY_COUNT: usize = DAYS.len();

/// Converts a time index to its period label, e.g. 0 -> "08:00-08:45"
pub fn time_label(time: usize) -> &'static str {
    TIMES.get(time).copied().unwrap_or("")
}

/// Converts a day index to its weekday name
pub fn day_label(day: usize) -> &'static str {
    DAYS.get(day).copied().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cover_the_week() {
        assert_eq!(TIME_COUNT, 9);
        assert_eq!(DAY_COUNT, 5);
        assert_eq!(time_label(0), "08:00-08:45");
        assert_eq!(time_label(8), "15:30-16:15");
        assert_eq!(time_label(9), "");
        assert_eq!(day_label(4), "Friday");
        assert_eq!(day_label(5), "");
    }
}
