#![allow(clippy::module_inception)]

use std::{rc::Rc, time::Instant};

use tracing::{debug, info};

use crate::{
    ast::declarations::Program,
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorTip},
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{symbol_pass::build_symbols, type_checker::check_types},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbols;
pub mod type_checker;

extern crate regex;

/// A byte offset into a named source file.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    /// Whether this position lies at or before `other` in the same file.
    pub fn precedes(&self, other: &Position) -> bool {
        self.0 <= other.0
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// A span covering `self` through `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }
}

/// The outcome of checking one source file.
#[derive(Debug)]
pub struct Analysis {
    pub program: Program,
    pub diagnostics: Diagnostics,
}

/// Runs the whole front end over `source`.
///
/// Lexer and parser failures abort and are returned as `Err`. Semantic
/// violations never abort: they are collected in [`Analysis::diagnostics`].
/// The type pass only runs when the symbol pass reported nothing.
pub fn check_source(source: &str, file: &str) -> Result<Analysis, Error> {
    let file = Rc::new(String::from(file));

    let start = Instant::now();
    let tokens = tokenize(source, Rc::clone(&file))?;
    info!(elapsed = ?start.elapsed(), tokens = tokens.len(), "tokenized");

    let parse_start = Instant::now();
    let mut program = parse(tokens, Rc::clone(&file))?;
    info!(elapsed = ?parse_start.elapsed(), items = program.items.len(), "parsed");

    let mut diagnostics = Diagnostics::new();

    let symbols_start = Instant::now();
    build_symbols(&mut program, &mut diagnostics);
    info!(elapsed = ?symbols_start.elapsed(), "built symbols");

    if diagnostics.is_empty() {
        let check_start = Instant::now();
        check_types(&mut program, &mut diagnostics)?;
        info!(elapsed = ?check_start.elapsed(), "type checked");
    } else {
        debug!(
            diagnostics = diagnostics.len(),
            "symbol pass reported errors, skipping type checking"
        );
    }

    Ok(Analysis {
        program,
        diagnostics,
    })
}

/// Finds the 1-based line containing byte offset `position`, the line's text
/// and the offset within that line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    // Errors at end of input point just past the last character
    if pos == source.len() {
        let line_number = source.split_inclusive('\n').count().max(1);
        let line = source.split_inclusive('\n').last().unwrap_or("");
        return Some((line_number, line.to_string(), line.len()));
    }

    None
}

/// Renders `error` against the source it was reported in.
///
/// ```text
/// Error: SymbolNotFound (`x` is not declared)
/// -> main.c
///   |
/// 2 | return x;
///   | -------^
/// ```
pub fn render_diagnostic(error: &Error, source: &str, file: &str) -> String {
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file));

    let Some((line, line_text, line_pos)) =
        get_line_at_position(source, error.get_position().0)
    else {
        return out;
    };

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_str, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
