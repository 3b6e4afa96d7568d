use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

use super::runner::OutputMode;

pub fn parse_output_mode(s: &str) -> Option<OutputMode> {
    match s.to_ascii_lowercase().as_str() {
        "human" => Some(OutputMode::Human),
        "plain" | "text" => Some(OutputMode::Plain),
        "json" => Some(OutputMode::Json),
        _ => None,
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Print `prompt`, read one line. `None` on end of input.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Empty input counts as missing.
pub fn non_empty(s: &str) -> Option<&str> {
    let t = s.trim();
    (!t.is_empty()).then_some(t)
}
