//! Interactive entry prompt for the `add` command

use std::io::{self, BufRead, Write};

use anyhow::bail;
use chrono::{Local, NaiveDate};

use crate::services::Repository;
use crate::types::NewEntry;

/// Hard cap for a single day's entry; the repository only requires
/// non-negative, but the interactive surfaces reject obvious typos.
pub const MAX_HOURS: f64 = 24.0;

pub fn run(
    repo: &Repository,
    date: Option<NaiveDate>,
    category: Option<String>,
    hours: Option<f64>,
    remarks: Option<String>,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let date = match date {
        Some(d) => d,
        None => prompt_date(&mut input)?,
    };
    let category = match category {
        Some(c) => c,
        None => prompt_category(&mut input)?,
    };
    let hours = match hours {
        Some(h) => h,
        None => prompt_hours(&mut input)?,
    };
    if !(0.0..=MAX_HOURS).contains(&hours) {
        bail!("hours must be between 0 and {MAX_HOURS}");
    }
    let remarks = match remarks {
        Some(r) => r,
        None => prompt_line(&mut input, "Any remarks (optional): ")?,
    };

    let id = repo.insert(&NewEntry::new(date, category, hours).with_remarks(remarks))?;
    println!("Record #{id} added.");
    Ok(())
}

fn prompt_date(input: &mut impl BufRead) -> anyhow::Result<NaiveDate> {
    let raw = prompt_line(input, "Enter date (YYYY-MM-DD) [default: today]: ")?;
    if raw.is_empty() {
        return Ok(Local::now().date_naive());
    }
    match raw.parse() {
        Ok(date) => Ok(date),
        Err(_) => bail!("invalid date format, use YYYY-MM-DD"),
    }
}

fn prompt_category(input: &mut impl BufRead) -> anyhow::Result<String> {
    let raw = prompt_line(input, "Enter category (Study/Social Media/Gaming/etc.): ")?;
    if raw.is_empty() {
        bail!("category cannot be empty");
    }
    Ok(raw)
}

fn prompt_hours(input: &mut impl BufRead) -> anyhow::Result<f64> {
    let raw = prompt_line(input, "Enter hours spent (e.g. 2.5): ")?;
    match raw.parse() {
        Ok(hours) => Ok(hours),
        Err(_) => bail!("invalid number for hours"),
    }
}

fn prompt_line(input: &mut impl BufRead, prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_date_default_today() {
        let mut input = "\n".as_bytes();
        let date = prompt_date(&mut input).unwrap();
        assert_eq!(date, Local::now().date_naive());
    }

    #[test]
    fn test_prompt_date_parses() {
        let mut input = "2025-11-01\n".as_bytes();
        let date = prompt_date(&mut input).unwrap();
        assert_eq!(date.to_string(), "2025-11-01");
    }

    #[test]
    fn test_prompt_date_rejects_garbage() {
        let mut input = "yesterday\n".as_bytes();
        assert!(prompt_date(&mut input).is_err());
    }

    #[test]
    fn test_prompt_category_rejects_empty() {
        let mut input = "\n".as_bytes();
        assert!(prompt_category(&mut input).is_err());
    }

    #[test]
    fn test_prompt_hours_parses_fraction() {
        let mut input = "2.5\n".as_bytes();
        assert_eq!(prompt_hours(&mut input).unwrap(), 2.5);
    }

    #[test]
    fn test_prompt_hours_rejects_garbage() {
        let mut input = "lots\n".as_bytes();
        assert!(prompt_hours(&mut input).is_err());
    }
}
