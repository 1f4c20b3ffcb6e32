use crate::error::EngineError;
use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use shared::models::PriceBar; // Using the PriceBar model from the shared crate
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub mod date_format {
    use super::*;

    /// Accepts RFC 3339 (`2024-01-02T15:30:00Z`), `YYYY-MM-DD HH:MM:SS` and
    /// plain `YYYY-MM-DD` (midnight UTC).
    pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| anyhow!("Failed to parse date '{}': {}", s, e))?;
        date.and_hms_opt(0, 0, 0)
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
            .ok_or_else(|| anyhow!("Failed to build midnight timestamp for '{}'", s))
    }

}

pub struct CsvBarParser;

impl CsvBarParser {
    // Header: date,open,high,low,close[,volume] (any order, case-insensitive)
    // Example Row: 2024-01-02,187.15,188.44,183.89,185.64,82488700
    pub fn load_bars_from_csv(file_path: &Path, delimiter: u8) -> Result<Vec<PriceBar>, EngineError> {
        let file = File::open(file_path)?;
        let bars = Self::parse_bars(BufReader::new(file), delimiter)?;
        tracing::info!(path = %file_path.display(), bars = bars.len(), "Loaded bars from CSV");
        Ok(bars)
    }

    pub fn parse_bars<R: Read>(reader: R, delimiter: u8) -> Result<Vec<PriceBar>, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut bars = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;

            let date_str = Self::required_field(&record, &headers, "date", line)?;
            let date = date_format::parse_date(date_str)
                .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing datetime at line {}: {}", line, e)))?;

            let open = Self::price_field(&record, &headers, "open", line)?;
            let high = Self::price_field(&record, &headers, "high", line)?;
            let low = Self::price_field(&record, &headers, "low", line)?;
            let close = Self::price_field(&record, &headers, "close", line)?;

            let volume = match Self::get_field(&record, &headers, "volume") {
                Some(s) if !s.is_empty() => Some(
                    s.parse::<u64>()
                        .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing 'volume' at line {}: {}", line, e)))?,
                ),
                _ => None,
            };

            bars.push(PriceBar::new(date, open, high, low, close, volume));
        }
        Ok(bars)
    }

    fn price_field(record: &StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<f64, EngineError> {
        Self::required_field(record, headers, name, line)?
            .parse::<f64>()
            .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", name, line, e)))
    }

    fn required_field<'a>(
        record: &'a StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<&'a str, EngineError> {
        Self::get_field(record, headers, name).ok_or_else(|| {
            EngineError::CsvDataFormatError(format!("Missing '{}' field in CSV record at line {}", name, line))
        })
    }

    // Looks a field up by header name so column order does not matter.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
    }
}
