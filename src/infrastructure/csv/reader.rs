// ============================================================
// CSV READER
// ============================================================
// Decode uploaded bytes and tokenize them into line-numbered rows

use crate::domain::error::{AppError, Result};
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// One tokenized data row with its 1-based source line number.
#[derive(Debug, Clone)]
pub struct SourceRow {
    pub line: u64,
    pub fields: Vec<String>,
}

/// Header plus data rows of one tokenized file.
#[derive(Debug, Clone)]
pub struct TokenizedCsv {
    pub header: Vec<String>,
    pub rows: Vec<SourceRow>,
}

/// CSV tokenizer. Quote-aware: a comma inside a quoted field is data,
/// not a separator.
pub struct CsvReader {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read and tokenize a file, decoding non-UTF-8 uploads as Windows-1252.
    pub fn read_file(&self, path: &Path) -> Result<TokenizedCsv> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        self.tokenize(&decode_bytes(&bytes))
    }

    /// Tokenize CSV content into a header and data rows. Fields are
    /// trimmed; rows may have differing field counts. Whitespace-only
    /// lines are dropped here so they never count as data rows.
    pub fn tokenize(&self, content: &str) -> Result<TokenizedCsv> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::FormatError(format!("Failed to read CSV header: {}", e)))?
            .iter()
            .map(|field| field.to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            // A record-level error never aborts the pass; the row is dropped.
            let record = match result {
                Ok(record) => record,
                Err(_) => continue,
            };

            if record.len() == 0 || (record.len() == 1 && record[0].is_empty()) {
                continue;
            }

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            rows.push(SourceRow {
                line,
                fields: record.iter().map(|field| field.to_string()).collect(),
            });
        }

        Ok(TokenizedCsv { header, rows })
    }
}

/// Decode uploaded bytes: UTF-8 first, Windows-1252 as the fallback for
/// spreadsheet exports from legacy tools.
pub fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(content) => content.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}
