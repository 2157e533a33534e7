//! Interactive selection of the run options
//!
//! Shows a numbered menu for a [`Selector`] and reads one answer, either the
//! menu number or the identifier. An unrecognised answer is an error; there
//! is no re-prompt.

use std::io::{BufRead, Write};

use crate::error::{Result, SegregationError};
use crate::models::Selector;

/// Ask for one value of a selector
pub fn prompt_selector<S, R, W>(input: &mut R, output: &mut W) -> Result<S>
where
    S: Selector,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Select {}:", S::KIND)?;
    for (number, option) in S::all().iter().enumerate() {
        writeln!(
            output,
            "  {}) {:<18} {}",
            number + 1,
            option.id(),
            option.description()
        )?;
    }
    write!(output, "Enter a number or name: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    parse_answer(answer.trim())
}

/// Interpret a menu answer as a number or an identifier
pub fn parse_answer<S: Selector>(answer: &str) -> Result<S> {
    if let Ok(number) = answer.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| S::all().get(index))
            .copied()
            .ok_or_else(|| SegregationError::InvalidSelector {
                kind: S::KIND,
                value: answer.to_string(),
                expected: format!("1-{} or {}", S::all().len(), S::expected()),
            });
    }
    S::parse_id(answer)
}
