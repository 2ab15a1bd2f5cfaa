use crate::cmds::Cmd;
use crate::error::{Error, ErrorKind, Result};
use crate::ui::Theme;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use termion::event::Key;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "MINICAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        locations.push([dir.as_str(), "minical", "config.toml"].iter().collect());
    } else if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".config").join("minical").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".minical.toml"));
    }

    locations
}

/// Parses a key name as used in the `[keys]` table.
pub fn parse_key(name: &str) -> Result<Key> {
    let key = match name {
        "Left" => Key::Left,
        "Right" => Key::Right,
        "Up" => Key::Up,
        "Down" => Key::Down,
        "Enter" => Key::Char('\n'),
        "Space" => Key::Char(' '),
        "Esc" => Key::Esc,
        "Backspace" => Key::Backspace,
        "Home" => Key::Home,
        "End" => Key::End,
        "PageUp" => Key::PageUp,
        "PageDown" => Key::PageDown,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => {
                    return Err(Error::new(
                        ErrorKind::KeyParse,
                        &format!("'{}' is not a known key", name),
                    ))
                }
            }
        }
    };

    Ok(key)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    tick_rate: Option<u64>,
    keys: HashMap<String, Cmd>,
    theme: Option<Theme>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub key_map: KeyMap,
    pub tick_rate: Duration,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Config {
        let mut config = Config {
            key_map: HashMap::new(),
            tick_rate: Duration::from_millis(500),
            theme: Theme::default(),
        };

        config.key_map.insert(Key::Left, Cmd::PrevMonth);
        config.key_map.insert(Key::Right, Cmd::NextMonth);
        config.key_map.insert(Key::Char('p'), Cmd::PrevMonth);
        config.key_map.insert(Key::Char('n'), Cmd::NextMonth);
        config.key_map.insert(Key::PageUp, Cmd::PrevYear);
        config.key_map.insert(Key::PageDown, Cmd::NextYear);
        config.key_map.insert(Key::Char('h'), Cmd::CursorLeft);
        config.key_map.insert(Key::Char('l'), Cmd::CursorRight);
        config.key_map.insert(Key::Char('k'), Cmd::CursorUp);
        config.key_map.insert(Key::Char('j'), Cmd::CursorDown);
        config.key_map.insert(Key::Char('\n'), Cmd::Select);
        config.key_map.insert(Key::Char(' '), Cmd::Select);
        config.key_map.insert(Key::Char('t'), Cmd::Today);
        config.key_map.insert(Key::Char('q'), Cmd::Exit);
        config.key_map.insert(Key::Esc, Cmd::Exit);

        config
    }
}

impl Config {
    /// Reads a configuration from TOML. Whatever is not given keeps its
    /// default; key bindings are added on top of the default ones.
    pub fn from_toml(content: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(millis) = file.tick_rate {
            config.tick_rate = Duration::from_millis(millis);
        }

        if let Some(theme) = file.theme {
            config.theme = theme;
        }

        for (name, cmd) in file.keys {
            config.key_map.insert(parse_key(&name)?, cmd);
        }

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|err| {
            Error::from(err).with_msg(&format!("Could not read {}", path.display()))
        })?;

        Config::from_toml(&content)
    }

    pub fn cmd_for(&self, key: &Key) -> Cmd {
        self.key_map.get(key).copied().unwrap_or_default()
    }
}

/// Loads `path` if given, otherwise the first existing file of the
/// default locations. Without any config file the defaults are used.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|candidate| candidate.is_file())
    {
        Some(found) => {
            log::info!("Using config file {}", found.display());
            Config::load(&found)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_arrow_keys_to_months() {
        let config = Config::default();
        assert_eq!(config.cmd_for(&Key::Left), Cmd::PrevMonth);
        assert_eq!(config.cmd_for(&Key::Right), Cmd::NextMonth);
        assert_eq!(config.cmd_for(&Key::PageUp), Cmd::PrevYear);
        assert_eq!(config.cmd_for(&Key::PageDown), Cmd::NextYear);
        assert_eq!(config.cmd_for(&Key::Char('x')), Cmd::Noop);
        assert_eq!(config.tick_rate, Duration::from_millis(500));
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.key_map, Config::default().key_map);
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let config = Config::from_toml(
            r#"
            tick_rate = 1000

            [keys]
            "Up" = "prev_month"
            "x" = "exit"
            "Left" = "cursor_left"

            [theme]
            today_char = "@"
            styled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.tick_rate, Duration::from_millis(1000));
        assert_eq!(config.cmd_for(&Key::Up), Cmd::PrevMonth);
        assert_eq!(config.cmd_for(&Key::Char('x')), Cmd::Exit);
        assert_eq!(config.cmd_for(&Key::Left), Cmd::CursorLeft);
        assert_eq!(config.cmd_for(&Key::Right), Cmd::NextMonth);

        assert_eq!(config.theme.today_char, Some('@'));
        assert_eq!(config.theme.selected_char, Some('>'));
        assert!(!config.theme.styled);
    }

    #[test]
    fn unknown_key_names_are_rejected() {
        let err = Config::from_toml("[keys]\n\"Hyper\" = \"exit\"\n").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::KeyParse));
    }

    #[test]
    fn unknown_commands_are_rejected() {
        let err = Config::from_toml("[keys]\n\"x\" = \"explode\"\n").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn parses_key_names() {
        assert_eq!(parse_key("Enter").unwrap(), Key::Char('\n'));
        assert_eq!(parse_key("Space").unwrap(), Key::Char(' '));
        assert_eq!(parse_key("q").unwrap(), Key::Char('q'));
        assert!(parse_key("").is_err());
        assert!(parse_key("qq").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/minical.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
