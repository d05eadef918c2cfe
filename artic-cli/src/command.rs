//! User commands typed at the prompt.

use std::str::FromStr;

use artic_lib::model::ArtworkId;

use crate::settings::parse_page_size;

/// A row on the visible page, by position or by artwork id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRef {
    /// One-based position on the page.
    Position(usize),
    /// Artwork id, written `#id`.
    Id(ArtworkId),
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    Page(u32),
    Rows(u32),
    Reload,
    Toggle(Vec<RowRef>),
    SelectPage,
    DeselectPage,
    /// Raw count text; validated by the session.
    SelectFirst(String),
    ClearSelection,
    ListSelected,
    Help,
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    BadArgument {
        command: &'static str,
        expected: String,
    },
}

impl CommandError {
    fn bad(command: &'static str, expected: impl Into<String>) -> Self {
        Self::BadArgument {
            command,
            expected: expected.into(),
        }
    }
}

impl FromStr for RowRef {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('#') {
            Some(id) => id.parse::<ArtworkId>().map(RowRef::Id).map_err(|_| ()),
            None => match s.parse::<usize>() {
                Ok(0) | Err(_) => Err(()),
                Ok(n) => Ok(RowRef::Position(n)),
            },
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "n" | "next" => Command::Next,
            "p" | "prev" | "previous" => Command::Previous,
            "first" => Command::First,
            "last" => Command::Last,
            "r" | "reload" => Command::Reload,
            "g" | "page" => Command::Page(
                rest.parse::<u32>()
                    .map_err(|_| CommandError::bad("page", "a page number"))?,
            ),
            "rows" => Command::Rows(
                parse_page_size(rest).map_err(|e| CommandError::bad("rows", e))?,
            ),
            "t" | "toggle" => {
                let refs = rest
                    .split_whitespace()
                    .map(str::parse)
                    .collect::<Result<Vec<RowRef>, ()>>()
                    .map_err(|_| CommandError::bad("toggle", "row numbers or #ids"))?;
                if refs.is_empty() {
                    return Err(CommandError::bad("toggle", "row numbers or #ids"));
                }
                Command::Toggle(refs)
            }
            "all" => Command::SelectPage,
            "none" => Command::DeselectPage,
            "s" | "select" => Command::SelectFirst(rest.to_string()),
            "clear" => Command::ClearSelection,
            "selected" | "ls" => Command::ListSelected,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(line.to_string())),
        };

        Ok(command)
    }
}

/// Command reference shown by `help`.
pub const HELP: &str = "\
n, next          next page
p, prev          previous page
first, last      first / last page
g, page N        go to page N
rows N           rows per page (5, 10, 12, 25, 50)
r, reload        reload this page
t, toggle R...   toggle rows by number, or by #id
all, none        tick / untick every row on this page
s, select N      tick the first N rows of this page
clear            drop the whole selection
selected         list selected ids
q, quit          exit";

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Command, CommandError> {
        s.parse()
    }

    #[test]
    fn test_navigation() {
        assert_eq!(parse("n"), Ok(Command::Next));
        assert_eq!(parse("  PREV "), Ok(Command::Previous));
        assert_eq!(parse("page 7"), Ok(Command::Page(7)));
        assert_eq!(parse("rows 25"), Ok(Command::Rows(25)));
        assert!(matches!(parse("rows 13"), Err(CommandError::BadArgument { command: "rows", .. })));
        assert!(matches!(parse("g"), Err(CommandError::BadArgument { command: "page", .. })));
    }

    #[test]
    fn test_toggle_refs() {
        assert_eq!(
            parse("t 1 3 #27992"),
            Ok(Command::Toggle(vec![
                RowRef::Position(1),
                RowRef::Position(3),
                RowRef::Id(27992)
            ]))
        );
        assert!(parse("toggle").is_err());
        assert!(parse("toggle 0").is_err());
        assert!(parse("toggle x").is_err());
    }

    #[test]
    fn test_select_keeps_raw_text() {
        assert_eq!(parse("select -3"), Ok(Command::SelectFirst("-3".into())));
        assert_eq!(parse("select abc"), Ok(Command::SelectFirst("abc".into())));
        assert_eq!(parse("select"), Ok(Command::SelectFirst(String::new())));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
