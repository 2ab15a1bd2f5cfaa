use std::cell::RefCell;
use std::rc::Rc;

use crate::calendar::{CalendarDate, DAYS_PER_WEEK};
use crate::cmds::Cmd;
use crate::config::Config;
use crate::error::Result;
use crate::events::{Dispatcher, Event};
use crate::grid::{CalendarGrid, Clock, SystemClock};

use super::Container;

const HELP: &str = "</>: month  PgUp/PgDn: year  hjkl: move  enter: select  t: today  q: quit";

pub struct App<'a, C: Clock = SystemClock> {
    config: &'a Config,
    grid: CalendarGrid<C>,
    cursor: usize,
    status: Rc<RefCell<Option<String>>>,
}

impl<'a, C: Clock> App<'a, C> {
    pub fn new(config: &'a Config, mut grid: CalendarGrid<C>) -> App<'a, C> {
        let status = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&status);
        grid.on_date_selected(move |date| {
            log::info!("Selected {}", date);
            *sink.borrow_mut() = Some(format!("Selected: {}", date.format("%a, %d %b %Y")));
        });

        let mut app = App {
            config,
            grid,
            cursor: 0,
            status,
        };
        app.cursor = app.home_cursor();
        app
    }

    pub fn grid(&self) -> &CalendarGrid<C> {
        &self.grid
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Today's cell if it is shown, the first day of the month otherwise.
    fn home_cursor(&self) -> usize {
        let cells = self.grid.cells();
        cells
            .iter()
            .position(|cell| cell.is_today)
            .or_else(|| cells.iter().position(|cell| cell.is_current_month))
            .unwrap_or(0)
    }

    fn clamp_cursor(&mut self) {
        let len = self.grid.cells().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Executes `cmd`. Returns `false` once the app should quit.
    pub fn handle(&mut self, cmd: Cmd) -> bool {
        match cmd {
            Cmd::Exit => return false,
            Cmd::Noop => {}
            Cmd::PrevMonth | Cmd::NextMonth | Cmd::PrevYear | Cmd::NextYear => {
                self.grid.handle(cmd);
            }
            Cmd::Today => {
                self.grid.handle(cmd);
                self.cursor = self.home_cursor();
            }
            Cmd::CursorLeft => self.cursor = self.cursor.saturating_sub(1),
            Cmd::CursorRight => self.cursor += 1,
            Cmd::CursorUp => {
                if self.cursor >= DAYS_PER_WEEK {
                    self.cursor -= DAYS_PER_WEEK;
                }
            }
            Cmd::CursorDown => {
                if self.cursor + DAYS_PER_WEEK < self.grid.cells().len() {
                    self.cursor += DAYS_PER_WEEK;
                }
            }
            Cmd::Select => {
                let date = self.grid.cells().get(self.cursor).map(|cell| cell.date);
                if let Some(date) = date {
                    self.grid.select(date);
                }
            }
        }

        self.clamp_cursor();
        true
    }

    pub fn status_lines(&self) -> Vec<String> {
        vec![
            String::new(),
            self.status
                .borrow()
                .clone()
                .unwrap_or_else(|| "No date selected".to_owned()),
            HELP.to_owned(),
        ]
    }

    pub fn draw(&self, container: &mut dyn Container) -> Result<()> {
        self.grid
            .pane()
            .cursor(Some(self.cursor))
            .status(self.status_lines())
            .mount(Some(container))?;
        Ok(())
    }

    /// Runs until the user quits and hands back the selected date.
    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        container: &mut dyn Container,
    ) -> Result<Option<CalendarDate>> {
        self.draw(container)?;

        while let Ok(event) = dispatcher.next() {
            match event {
                Event::Update => {}
                Event::Input(key) => {
                    let cmd = self.config.cmd_for(&key);
                    log::trace!("{:?} -> {:?}", key, cmd);
                    if !self.handle(cmd) {
                        break;
                    }
                }
            }

            self.draw(container)?;
        }

        Ok(self.grid.selected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthIndex;
    use crate::grid::FixedClock;
    use crate::ui::{TextContainer, Theme};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn app(config: &Config) -> App<'_, FixedClock> {
        let grid =
            CalendarGrid::with_clock(FixedClock(date(2026, 10, 18))).with_theme(Theme::plain());
        App::new(config, grid)
    }

    #[test]
    fn cursor_starts_on_today() {
        let config = Config::default();
        let app = app(&config);

        // October 2026 starts on a Thursday
        assert_eq!(app.cursor(), 4 + 17);
    }

    #[test]
    fn selects_date_under_cursor() {
        let config = Config::default();
        let mut app = app(&config);

        assert!(app.handle(Cmd::CursorUp));
        assert!(app.handle(Cmd::CursorLeft));
        assert!(app.handle(Cmd::Select));

        assert_eq!(app.grid().selected(), Some(date(2026, 10, 10)));
        assert_eq!(
            app.status_lines()[1],
            "Selected: Sat, 10 Oct 2026".to_owned()
        );
    }

    #[test]
    fn padding_cells_can_be_selected() {
        let config = Config::default();
        let mut app = app(&config);

        for _ in 0..10 {
            app.handle(Cmd::CursorUp);
        }
        for _ in 0..10 {
            app.handle(Cmd::CursorLeft);
        }
        assert_eq!(app.cursor(), 0);
        app.handle(Cmd::Select);

        assert_eq!(app.grid().selected(), Some(date(2026, 9, 27)));
        let first = app.grid().cells()[0];
        assert!(first.is_selected);
        assert!(!first.is_current_month);
    }

    #[test]
    fn cursor_stays_inside_grid() {
        let config = Config::default();
        let mut app = app(&config);

        for _ in 0..50 {
            app.handle(Cmd::CursorRight);
            app.handle(Cmd::CursorDown);
        }
        // October 2026 spans five weeks
        assert_eq!(app.cursor(), 34);

        // February 2015 only spans four
        app.grid.show_month(MonthIndex::from_ym(2015, 3).unwrap());
        app.handle(Cmd::PrevMonth);
        assert_eq!(app.cursor(), 27);
    }

    #[test]
    fn navigation_keeps_selection() {
        let config = Config::default();
        let mut app = app(&config);

        app.handle(Cmd::Select);
        app.handle(Cmd::NextMonth);
        app.handle(Cmd::PrevMonth);

        assert_eq!(app.grid().selected(), Some(date(2026, 10, 18)));
        assert_eq!(
            app.grid().visible_month(),
            MonthIndex::from_ym(2026, 10).unwrap()
        );
    }

    #[test]
    fn today_returns_home() {
        let config = Config::default();
        let mut app = app(&config);

        app.handle(Cmd::NextMonth);
        app.handle(Cmd::NextMonth);
        app.handle(Cmd::Today);

        assert_eq!(
            app.grid().visible_month(),
            MonthIndex::from_ym(2026, 10).unwrap()
        );
        assert_eq!(app.cursor(), 21);
    }

    #[test]
    fn exit_stops_the_loop() {
        let config = Config::default();
        let mut app = app(&config);

        assert!(app.handle(Cmd::Noop));
        assert!(!app.handle(Cmd::Exit));
    }

    #[test]
    fn draws_grid_with_status() {
        let config = Config::default();
        let app = app(&config);
        let mut container = TextContainer::default();

        app.draw(&mut container).unwrap();

        let lines = container.lines();
        assert_eq!(lines[0].trim(), "October 2026");
        assert_eq!(lines[lines.len() - 2], "No date selected");
        assert_eq!(lines[lines.len() - 1], HELP);
    }
}
