#![allow(clippy::module_inception)]

use crate::errors::errors::Error;

pub mod defs;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod statements;

extern crate regex;

use std::rc::Rc;

/// Byte offset into a parsed unit plus the unit's name. Units are
/// in-memory strings, never files; the default unit name is "shell".
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    if source.is_empty() {
        return (1, String::new(), 0);
    }
    // A failure right at the end of the unit still points at the last line.
    let pos = (position as usize).min(source.len() - 1);

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    (line_number, String::new(), 0)
}

pub fn format_error(error: &Error, source: &str) -> String {
    /*
        Error: ParsingFailed (unexpected token `#`)
        -> shell
           |
        20 | abc = #
           | ------^
    */

    let position = match error.position() {
        Some(position) => position,
        None => return format!("Error: {} ({})", error.name(), error),
    };
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut output = String::new();
    output.push_str(&format!("Error: {} ({})\n", error.name(), error));
    output.push_str(&format!("-> {}\n", position.1));
    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (line_pos + 1).saturating_sub(removed_whitespace).max(1);

    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let source = "abc = 0\ndef = 1\n";
        let (line_number, line, line_pos) = super::get_line_at_position(source, 2);
        assert_eq!(line_number, 1);
        assert_eq!(line, "abc = 0\n");
        assert_eq!(line_pos, 2);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 12);
        assert_eq!(line_number, 2);
        assert_eq!(line, "def = 1\n");
        assert_eq!(line_pos, 4);
    }

    #[test]
    fn test_get_line_at_position_past_the_end() {
        let (line_number, _, _) = super::get_line_at_position("abc", 17);
        assert_eq!(line_number, 1);
        let (line_number, line, line_pos) = super::get_line_at_position("", 0);
        assert_eq!((line_number, line.as_str(), line_pos), (1, "", 0));
    }
}
