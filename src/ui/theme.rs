use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Marker in front of today's day number
    pub today_char: Option<char>,
    /// Marker in front of the selected day number
    pub selected_char: Option<char>,
    pub show_other_months: bool,
    /// Use terminal escape sequences for highlighting
    pub styled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            today_char: Some('*'),
            selected_char: Some('>'),
            show_other_months: true,
            styled: true,
        }
    }
}

impl Theme {
    pub fn plain() -> Self {
        Theme {
            styled: false,
            ..Theme::default()
        }
    }
}
