use std::fmt;
use std::io::{self, Write};

use termion::{clear, cursor};

/// Host-provided render target for a calendar.
pub trait Container {
    /// Replaces whatever was shown before with `lines`.
    fn present(&mut self, lines: &[String]) -> io::Result<()>;
}

/// Keeps the last presented lines in memory.
#[derive(Debug, Default, Clone)]
pub struct TextContainer {
    lines: Vec<String>,
}

impl TextContainer {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Container for TextContainer {
    fn present(&mut self, lines: &[String]) -> io::Result<()> {
        self.lines = lines.to_vec();
        Ok(())
    }
}

impl fmt::Display for TextContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Draws onto a terminal, usually a raw mode alternate screen.
pub struct TerminalContainer<W: Write> {
    out: W,
}

impl<W: Write> TerminalContainer<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        write!(out, "{}", cursor::Hide)?;
        Ok(TerminalContainer { out })
    }
}

impl<W: Write> Container for TerminalContainer<W> {
    fn present(&mut self, lines: &[String]) -> io::Result<()> {
        write!(self.out, "{}", clear::All)?;
        // Raw mode does not return the carriage on '\n'
        for (row, line) in lines.iter().enumerate() {
            write!(self.out, "{}{}", cursor::Goto(1, row as u16 + 1), line)?;
        }
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalContainer<W> {
    fn drop(&mut self) {
        let _ = write!(self.out, "{}", cursor::Show);
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_container_replaces_content() {
        let mut container = TextContainer::default();
        container
            .present(&["a".to_owned(), "b".to_owned()])
            .unwrap();
        container.present(&["c".to_owned()]).unwrap();

        assert_eq!(container.lines(), &["c".to_owned()]);
        assert_eq!(container.to_string(), "c\n");
    }

    #[test]
    fn terminal_container_positions_every_line() {
        let mut buf = Vec::new();
        {
            let mut term = TerminalContainer::new(&mut buf).unwrap();
            term.present(&["first".to_owned(), "second".to_owned()])
                .unwrap();
        }
        let out = String::from_utf8(buf).unwrap();

        assert!(out.starts_with(&cursor::Hide.to_string()));
        assert!(out.contains(&format!("{}first", cursor::Goto(1, 1))));
        assert!(out.contains(&format!("{}second", cursor::Goto(1, 2))));
        assert!(out.ends_with(&cursor::Show.to_string()));
    }
}
