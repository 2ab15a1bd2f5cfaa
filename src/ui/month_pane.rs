use itertools::Itertools;
use std::fmt::{self, Display};
use std::io;
use termion::{color, style};

use crate::calendar::{weeks, DayCell, MonthIndex, DAYS_PER_WEEK};

use super::{Container, Theme};

struct CellView<'a> {
    cell: &'a DayCell,
    theme: &'a Theme,
    under_cursor: bool,
}

impl CellView<'_> {
    const CELL_WIDTH: usize = 4;

    fn escapes(&self) -> String {
        let mut escapes = String::new();
        if !self.cell.is_current_month {
            escapes.push_str(&color::Fg(color::LightBlack).to_string());
        }
        if self.cell.is_today {
            escapes.push_str(&style::Bold.to_string());
        }
        if self.cell.is_selected {
            escapes.push_str(&style::Invert.to_string());
        }
        if self.under_cursor {
            escapes.push_str(&style::Underline.to_string());
        }
        escapes
    }
}

impl Display for CellView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.cell.is_current_month && !self.theme.show_other_months {
            return write!(f, "{:width$}", "", width = Self::CELL_WIDTH);
        }

        let arg_today = if self.cell.is_today {
            self.theme.today_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_selected = if self.cell.is_selected {
            self.theme.selected_char.unwrap_or(' ')
        } else {
            ' '
        };

        if self.theme.styled {
            write!(
                f,
                "{}{}{}{:>2}{}",
                arg_today,
                arg_selected,
                self.escapes(),
                self.cell.day(),
                style::Reset
            )
        } else {
            write!(f, "{}{}{:>2}", arg_today, arg_selected, self.cell.day())
        }
    }
}

/// Text rendering of one month's grid.
pub struct MonthPane<'a> {
    month: MonthIndex,
    cells: Vec<DayCell>,
    theme: &'a Theme,
    cursor: Option<usize>,
    status: Vec<String>,
}

impl<'a> MonthPane<'a> {
    const HEADER: &'static [&'static str] = &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

    pub fn new(month: MonthIndex, cells: Vec<DayCell>, theme: &'a Theme) -> Self {
        MonthPane {
            month,
            cells,
            theme,
            cursor: None,
            status: Vec::new(),
        }
    }

    pub fn width() -> usize {
        DAYS_PER_WEEK * CellView::CELL_WIDTH
    }

    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Lines shown below the grid.
    pub fn status<I: IntoIterator<Item = String>>(mut self, lines: I) -> Self {
        self.status = lines.into_iter().collect();
        self
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn lines(&self) -> Vec<String> {
        let title = format!(
            "{:^width$}",
            self.month.to_string(),
            width = Self::width()
        );

        let header = Self::HEADER
            .iter()
            .map(|head| format!("{:>width$}", head, width = CellView::CELL_WIDTH))
            .join("");

        let mut lines = vec![title.trim_end().to_owned(), header];

        lines.extend(weeks(&self.cells).enumerate().map(|(row, week)| {
            week.iter()
                .enumerate()
                .map(|(col, cell)| {
                    CellView {
                        cell,
                        theme: self.theme,
                        under_cursor: self.cursor == Some(row * DAYS_PER_WEEK + col),
                    }
                    .to_string()
                })
                .join("")
        }));

        lines.extend(self.status.iter().cloned());
        lines
    }

    /// Presents the pane in `container`. Without a container there is
    /// nothing to draw on and the call does nothing.
    pub fn mount(&self, container: Option<&mut dyn Container>) -> io::Result<()> {
        match container {
            Some(container) => container.present(&self.lines()),
            None => {
                log::debug!("No container to mount {} into", self.month);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::generate;
    use crate::ui::TextContainer;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn january_2024(theme: &Theme) -> MonthPane<'_> {
        let jan = MonthIndex::from_ym(2024, 1).unwrap();
        let cells = generate(jan, Some(date(2024, 1, 3)), date(2024, 1, 2));
        MonthPane::new(jan, cells, theme)
    }

    #[test]
    fn renders_title_header_and_weeks() {
        let theme = Theme::plain();
        let lines = january_2024(&theme).lines();

        assert_eq!(lines.len(), 2 + 5);
        assert_eq!(lines[0].trim(), "January 2024");
        assert_eq!(lines[1], " Sun Mon Tue Wed Thu Fri Sat");
        assert_eq!(lines[2], "  31   1*  2 > 3   4   5   6");
        assert_eq!(lines[6], "  28  29  30  31   1   2   3");
        assert!(lines
            .iter()
            .skip(1)
            .all(|line| line.chars().count() == MonthPane::width()));
    }

    #[test]
    fn hides_other_months_on_request() {
        let theme = Theme {
            show_other_months: false,
            ..Theme::plain()
        };
        let lines = january_2024(&theme).lines();

        assert_eq!(lines[2], "       1*  2 > 3   4   5   6");
        assert_eq!(lines[6], "  28  29  30  31            ");
    }

    #[test]
    fn styled_cells_reset_their_escapes() {
        let theme = Theme::default();
        let lines = january_2024(&theme).cursor(Some(0)).lines();

        assert!(lines[2].contains(&style::Underline.to_string()));
        assert!(lines[2].contains(&style::Invert.to_string()));
        assert_eq!(
            lines[2].matches(&style::Reset.to_string()).count(),
            DAYS_PER_WEEK
        );
    }

    #[test]
    fn status_lines_follow_the_grid() {
        let theme = Theme::plain();
        let lines = january_2024(&theme)
            .status(vec!["Selected: 2024-01-03".to_owned()])
            .lines();

        assert_eq!(lines.last().unwrap(), "Selected: 2024-01-03");
    }

    #[test]
    fn mounting_without_container_is_a_noop() {
        let theme = Theme::plain();
        assert!(january_2024(&theme).mount(None).is_ok());

        let mut container = TextContainer::default();
        january_2024(&theme).mount(Some(&mut container)).unwrap();
        assert_eq!(container.lines()[0].trim(), "January 2024");
    }
}
