use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cmd {
    Noop,
    PrevMonth,
    NextMonth,
    PrevYear,
    NextYear,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    Select,
    Today,
    Exit,
}

impl Default for Cmd {
    fn default() -> Self {
        Cmd::Noop
    }
}
