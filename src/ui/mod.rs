pub mod app;
mod container;
mod month_pane;
mod theme;

pub use app::App;
pub use container::{Container, TerminalContainer, TextContainer};
pub use month_pane::MonthPane;
pub use theme::Theme;
