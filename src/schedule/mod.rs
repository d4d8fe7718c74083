pub mod types;
pub mod slot_utils;
pub mod store;
pub mod integrity;

pub use types::{Grid, Slot, SlotField, SlotIndex};
pub use slot_utils::{day_label, time_label, DAYS, DAY_COUNT, TIMES, TIME_COUNT};
pub use store::ScheduleStore;
pub use integrity::invalidate;
