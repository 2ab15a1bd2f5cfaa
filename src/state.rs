use crate::calendar::{CalendarDate, MonthIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// The mutable part of a calendar: which month is shown and which date,
/// if any, is selected. Both change independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    visible: MonthIndex,
    selected: Option<CalendarDate>,
}

impl Default for CalendarState {
    fn default() -> Self {
        CalendarState::new(MonthIndex::default())
    }
}

impl CalendarState {
    pub fn new(visible: MonthIndex) -> Self {
        CalendarState {
            visible,
            selected: None,
        }
    }

    pub fn visible(&self) -> MonthIndex {
        self.visible
    }

    pub fn selected(&self) -> Option<CalendarDate> {
        self.selected
    }

    pub fn with_visible(mut self, visible: MonthIndex) -> Self {
        self.visible = visible;
        self
    }
}

/// Shows the month adjacent to the visible one. The selection is kept.
pub fn navigate(state: CalendarState, direction: Direction) -> CalendarState {
    let visible = match direction {
        Direction::Previous => state.visible.prev(),
        Direction::Next => state.visible.next(),
    };

    state.with_visible(visible)
}

/// Replaces the selection with `date`, which does not need to lie in the
/// visible month.
pub fn select(state: CalendarState, date: CalendarDate) -> CalendarState {
    CalendarState {
        selected: Some(date),
        ..state
    }
}
