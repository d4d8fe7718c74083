use thiserror::Error;

/// A persisted document that cannot be adopted. The whole load is discarded.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("activity {index}: invalid lecture '{value}'")]
    UnknownLecture { index: usize, value: String },
    #[error("activity {index}: invalid group '{value}'")]
    UnknownGroup { index: usize, value: String },
    #[error("activity {index}: invalid room '{value}'")]
    UnknownRoom { index: usize, value: String },
    #[error("activity {index}: invalid teacher '{value}'")]
    UnknownTeacher { index: usize, value: String },
    #[error("activity {index}: invalid day {day} - must be integer in [0, 5)")]
    DayOutOfRange { index: usize, day: i64 },
    #[error("activity {index}: invalid slot {slot} - must be integer in [0, 9)")]
    SlotOutOfRange { index: usize, slot: i64 },
}

/// A rejected edit. The timetable is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("unknown room '{0}'")]
    UnknownRoom(String),
    #[error("unknown group '{0}'")]
    UnknownGroup(String),
    #[error("unknown lecture '{0}'")]
    UnknownLecture(String),
    #[error("unknown teacher '{0}'")]
    UnknownTeacher(String),
    #[error("slot ({time}, {day}) is outside the timetable")]
    OutOfRange { time: i64, day: i64 },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown list '{0}', expected one of rooms, groups, lectures, teachers")]
pub struct UnknownListKind(pub String);
