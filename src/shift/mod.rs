//! Shifts: the day × time-slot grid and per-cell assignment state.

pub mod error;
mod shift;
mod slot;

pub use error::ShiftError;
pub use shift::{Shift, ShiftId};
pub use slot::{Day, ShiftKey, ShiftKind, TimeSlot};
