use chrono::Local;
use std::io;

use crate::calendar::{generate, CalendarDate, DayCell, MonthIndex};
use crate::cmds::Cmd;
use crate::state::{self, CalendarState, Direction};
use crate::ui::{Container, MonthPane, Theme};

/// Source of the current date, used to mark today's cell.
pub trait Clock {
    fn today(&self) -> CalendarDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(usize);

type Observer = Box<dyn FnMut(&CalendarDate)>;

/// A month calendar with a single selectable date.
///
/// Each instance owns its state; observers registered with
/// [`CalendarGrid::on_date_selected`] are called synchronously whenever a
/// date gets selected.
pub struct CalendarGrid<C: Clock = SystemClock> {
    state: CalendarState,
    clock: C,
    theme: Theme,
    observers: Vec<(ObserverId, Observer)>,
    next_observer_id: usize,
}

impl Default for CalendarGrid<SystemClock> {
    fn default() -> Self {
        CalendarGrid::with_clock(SystemClock)
    }
}

impl CalendarGrid<SystemClock> {
    pub fn new() -> Self {
        CalendarGrid::default()
    }
}

impl<C: Clock> CalendarGrid<C> {
    pub fn with_clock(clock: C) -> Self {
        let state = CalendarState::new(MonthIndex::from(clock.today()));

        CalendarGrid {
            state,
            clock,
            theme: Theme::default(),
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn visible_month(&self) -> MonthIndex {
        self.state.visible()
    }

    pub fn selected(&self) -> Option<CalendarDate> {
        self.state.selected()
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    pub fn cells(&self) -> Vec<DayCell> {
        generate(self.state.visible(), self.state.selected(), self.today())
    }

    pub fn navigate(&mut self, direction: Direction) {
        self.state = state::navigate(self.state, direction);
        log::debug!("Showing {}", self.state.visible());
    }

    pub fn show_month(&mut self, month: MonthIndex) {
        self.state = self.state.with_visible(month);
    }

    pub fn show_today(&mut self) {
        self.show_month(MonthIndex::from(self.today()));
    }

    pub fn select(&mut self, date: CalendarDate) {
        self.state = state::select(self.state, date);
        log::debug!("Selected {}", date);

        for (_, observer) in self.observers.iter_mut() {
            observer(&date);
        }
    }

    pub fn on_date_selected<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&CalendarDate) + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Applies the month related commands. Returns whether `cmd` was one of
    /// them.
    pub fn handle(&mut self, cmd: Cmd) -> bool {
        match cmd {
            Cmd::PrevMonth => self.navigate(Direction::Previous),
            Cmd::NextMonth => self.navigate(Direction::Next),
            Cmd::PrevYear => self.show_month(self.visible_month() - 12),
            Cmd::NextYear => self.show_month(self.visible_month() + 12),
            Cmd::Today => self.show_today(),
            _ => return false,
        }
        true
    }

    pub fn pane(&self) -> MonthPane<'_> {
        MonthPane::new(self.state.visible(), self.cells(), &self.theme)
    }

    pub fn mount(&self, container: Option<&mut dyn Container>) -> io::Result<()> {
        self.pane().mount(container)
    }
}
