//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Reading operator input from the terminal

use std::io::{self, BufRead, Write};

pub mod formatter;

pub use formatter::{display_error, display_generated, display_send_report, display_success};

/// Prompts the operator for a single line of input.
///
/// The prompt is printed without a trailing newline and stdout is flushed
/// before reading.
///
/// # Returns
/// * `Ok(Some(line))` - The line read, without its line terminator
/// * `Ok(None)` - Standard input reached end of file before any input
/// * `Err` - If reading or writing the terminal fails
pub fn prompt_line(message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    read_line(&mut io::stdin().lock())
}

fn read_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(None);
    }
    let trimmed = input.trim_end_matches(['\r', '\n']).len();
    input.truncate(trimmed);
    Ok(Some(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_terminator() {
        let mut input = Cursor::new("https://forum.example/t/1\r\nnext\n");
        assert_eq!(
            read_line(&mut input).unwrap(),
            Some("https://forum.example/t/1".to_string())
        );
        assert_eq!(read_line(&mut input).unwrap(), Some("next".to_string()));
    }

    #[test]
    fn test_read_line_end_of_input() {
        let mut input = Cursor::new("");
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_line_empty_line_is_not_end_of_input() {
        let mut input = Cursor::new("\n");
        assert_eq!(read_line(&mut input).unwrap(), Some(String::new()));
    }
}
