//! Weekly room-booking timetable: reference lists, per-room slot grids,
//! cascading invalidation when a list shrinks, and the JSON document the
//! whole state is persisted as.

pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod export;
pub mod lists;
pub mod persistence;
pub mod schedule;
pub mod state;
pub mod views;
pub mod web;

pub use document::{Activity, Document};
pub use error::{DocumentError, MutationError, StoreError};
pub use lists::{ListKind, ReferenceList};
pub use schedule::{Grid, ScheduleStore, Slot, SlotField, SlotIndex};
pub use state::Timetable;
