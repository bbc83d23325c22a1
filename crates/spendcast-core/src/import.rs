//! CSV import of transaction exports
//!
//! Columns are located by header name (case-insensitive): `date`, `amount` and
//! `category` are required, anything else is ignored. Amounts follow the bank
//! convention: negative rows are expenses and are stored as positive spend;
//! positive rows (salary, refunds, transfers in) and zero rows are skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{TransactionRecord, UNCATEGORIZED};

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    amount: usize,
    category: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| Error::InvalidData(format!("Missing required column: {}", name)))
        };
        Ok(Self {
            date: find("date")?,
            amount: find("amount")?,
            category: find("category")?,
        })
    }
}

/// Parse transactions from CSV data
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in rdr.records().enumerate() {
        let row = result?;

        let date_str = row
            .get(columns.date)
            .ok_or_else(|| Error::Import(format!("Row {}: missing date", line + 1)))?;
        let timestamp = parse_timestamp(date_str)?;

        let amount_str = row
            .get(columns.amount)
            .ok_or_else(|| Error::Import(format!("Row {}: missing amount", line + 1)))?;
        let amount = parse_amount(amount_str)?;
        if amount >= 0 {
            skipped += 1;
            continue;
        }
        let spend = amount
            .checked_neg()
            .ok_or_else(|| Error::Import(format!("Row {}: amount out of range", line + 1)))?;

        let category = row
            .get(columns.category)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNCATEGORIZED);

        records.push(TransactionRecord::new(timestamp, spend, category));
    }

    debug!(records = records.len(), skipped, "Parsed transaction CSV");
    Ok(records)
}

/// Read and parse a CSV file
pub fn read_csv_file(path: &Path) -> Result<Vec<TransactionRecord>> {
    let file = File::open(path)?;
    parse_csv(file)
}

/// Parse an RFC 3339 timestamp, or a plain date taken as midnight UTC
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    parse_date(s).map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Parse a date string in the accepted formats
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2026-01-15
        "%m/%d/%Y", // 01/15/2026
        "%m/%d/%y", // 01/15/26
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse a currency amount into integer minor units (cents).
///
/// Handles currency symbols, thousands separators and parenthesised negatives.
pub fn parse_amount(s: &str) -> Result<i64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    let value = cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))?;
    if !value.is_finite() {
        return Err(Error::Import(format!("Unable to parse amount: {}", s)));
    }

    let cents = (value * 100.0).round();
    if cents <= i64::MIN as f64 || cents >= i64::MAX as f64 {
        return Err(Error::Import(format!("Amount out of range: {}", s)));
    }

    Ok(cents as i64)
}
