pub mod calendar;
pub mod cmds;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod state;
pub mod ui;

pub use calendar::{generate, CalendarDate, DayCell, MonthIndex};
pub use grid::{CalendarGrid, Clock, FixedClock, SystemClock};
pub use state::{navigate, select, CalendarState, Direction};
