use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, NaiveTime};

/// Write `prompt` without a newline, flush, and read one line with the
/// trailing newline stripped. A closed stream surfaces as
/// `UnexpectedEof` so callers can wind the session down instead of
/// spinning.
pub fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

/// Retry until the line parses as a whole number.
pub fn read_u32<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<u32> {
    loop {
        let line = read_line(input, out, prompt)?;
        match line.trim().parse() {
            Ok(n) => return Ok(n),
            Err(_) => writeln!(out, "Invalid input. Please enter a whole number.")?,
        }
    }
}

/// Retry until the line parses as a non-negative finite number.
pub fn read_rate<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<f64> {
    loop {
        let line = read_line(input, out, prompt)?;
        match line.trim().parse::<f64>() {
            Ok(rate) if rate >= 0.0 && rate.is_finite() => return Ok(rate),
            Ok(rate) if rate < 0.0 => {
                writeln!(out, "Input cannot be negative. Please try again.")?;
            }
            _ => writeln!(out, "Invalid input. Please enter a number (e.g., 10.50).")?,
        }
    }
}

/// Retry until the line parses as an ISO date.
pub fn read_date<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<NaiveDate> {
    loop {
        let line = read_line(input, out, prompt)?;
        match NaiveDate::parse_from_str(line.trim(), "%Y-%m-%d") {
            Ok(date) => return Ok(date),
            Err(_) => {
                writeln!(out, "Invalid date format. Please use YYYY-MM-DD (e.g., 2025-04-03).")?;
            }
        }
    }
}

/// Retry until the line parses as a 24-hour wall-clock time.
pub fn read_time<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<NaiveTime> {
    loop {
        let line = read_line(input, out, prompt)?;
        match NaiveTime::parse_from_str(line.trim(), "%H:%M") {
            Ok(time) => return Ok(time),
            Err(_) => {
                writeln!(out, "Invalid time format. Please use HH:MM (e.g., 09:00 or 14:30).")?;
            }
        }
    }
}

/// Require a non-empty answer; anything but `yes` declines.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<bool> {
    loop {
        let line = read_line(input, out, prompt)?;
        let answer = line.trim();
        if answer.is_empty() {
            writeln!(out, "Input cannot be empty. Please try again.")?;
            continue;
        }
        return Ok(answer.eq_ignore_ascii_case("yes"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_line_prompts_and_strips_newline() {
        let mut input = Cursor::new(&b"Alice\n"[..]);
        let mut out = Vec::new();
        let line = read_line(&mut input, &mut out, "name: ").unwrap();
        assert_eq!(line, "Alice");
        assert_eq!(out, b"name: ");
    }

    #[test]
    fn read_line_reports_closed_input() {
        let mut input = Cursor::new(&b""[..]);
        let mut out = Vec::new();
        let err = read_line(&mut input, &mut out, "name: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn read_u32_retries_until_numeric() {
        let mut input = Cursor::new(&b"forty\n4.5\n42\n"[..]);
        let mut out = Vec::new();
        let n = read_u32(&mut input, &mut out, "> ").unwrap();
        assert_eq!(n, 42);
        let transcript = String::from_utf8(out).unwrap();
        assert_eq!(
            transcript
                .matches("Invalid input. Please enter a whole number.")
                .count(),
            2
        );
    }

    #[test]
    fn read_rate_rejects_negative_then_accepts() {
        let mut input = Cursor::new(&b"-3\nabc\n10.50\n"[..]);
        let mut out = Vec::new();
        let rate = read_rate(&mut input, &mut out, "$").unwrap();
        assert_eq!(rate, 10.5);
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Input cannot be negative. Please try again."));
        assert!(transcript.contains("Invalid input. Please enter a number (e.g., 10.50)."));
    }

    #[test]
    fn read_date_retries_on_bad_format() {
        let mut input = Cursor::new(&b"03/04/2025\n2025-04-03\n"[..]);
        let mut out = Vec::new();
        let date = read_date(&mut input, &mut out, "> ").unwrap();
        assert_eq!(date.to_string(), "2025-04-03");
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Invalid date format."));
    }

    #[test]
    fn read_time_retries_on_bad_format() {
        let mut input = Cursor::new(&b"9am\n09:00\n"[..]);
        let mut out = Vec::new();
        let time = read_time(&mut input, &mut out, "> ").unwrap();
        assert_eq!(time.format("%H:%M").to_string(), "09:00");
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Invalid time format."));
    }

    #[test]
    fn confirm_requires_non_empty_and_matches_yes() {
        let mut input = Cursor::new(&b"\nYES\n"[..]);
        let mut out = Vec::new();
        assert!(confirm(&mut input, &mut out, "sure? ").unwrap());
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Input cannot be empty. Please try again."));

        let mut input = Cursor::new(&b"no\n"[..]);
        let mut out = Vec::new();
        assert!(!confirm(&mut input, &mut out, "sure? ").unwrap());
    }
}
