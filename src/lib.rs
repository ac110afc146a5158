#![allow(clippy::module_inception)]

use std::{fs, path::PathBuf, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod source;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub col: u32,
    pub filename: Rc<String>,
}

impl Position {
    pub fn start(filename: Rc<String>) -> Self {
        Position {
            line: 1,
            col: 1,
            filename,
        }
    }

    pub fn null() -> Self {
        Position {
            line: 0,
            col: 0,
            filename: Rc::new(String::from("<null>")),
        }
    }
}

pub fn get_line(file: PathBuf, line_number: u32) -> Option<String> {
    let content = fs::read_to_string(&file).ok()?;

    content
        .lines()
        .nth(line_number.saturating_sub(1) as usize)
        .map(String::from)
}


pub fn display_error(error: Error, file: PathBuf) {
    /*
        error: message
        -> final.c
           |
        20 | int a = $;
           | --------^
    */

    let position = error.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", file.as_os_str().to_string_lossy());
    println!("{:>padding$}", "|");

    let line_text = get_line(file, position.line).unwrap_or_default();
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim());

    let arrows = (position.col as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    println!("{:>padding$} {:->arrows$}", "|", "^");
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
