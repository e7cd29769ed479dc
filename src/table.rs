//! Delimited phrase-table I/O.
//!
//! Tables are plain delimited text with a header row. The source and target
//! columns are located by name; any other columns ride along untouched so the
//! output keeps the input's schema. Rows the parser cannot decode are logged
//! and dropped rather than failing the whole file.

use std::path::Path;

use tracing::warn;

use crate::error::InputFormatError;

/// One (source, target) row as collaborators exchange them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPair {
    pub source: String,
    pub target: String,
}

/// Delimiter and column naming shared by input and output tables.
#[derive(Debug, Clone)]
pub struct TableFormat {
    pub delimiter: u8,
    pub source_column: String,
    pub target_column: String,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: b';',
            source_column: "source".to_string(),
            target_column: "target".to_string(),
        }
    }
}

/// True when a target cell still needs translation: empty, whitespace-only,
/// or the literal `nan` marker left behind by earlier spreadsheet tooling.
pub fn is_blank_target(target: &str) -> bool {
    let trimmed = target.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

/// An in-memory phrase table: the header row plus every data row, with the
/// source/target columns resolved to indices.
#[derive(Debug, Clone)]
pub struct PhraseTable {
    headers: Vec<String>,
    source_idx: usize,
    target_idx: usize,
    rows: Vec<Vec<String>>,
}

impl PhraseTable {
    /// Read a table from disk, resolving the configured columns by name.
    pub fn read(path: &Path, format: &TableFormat) -> Result<Self, InputFormatError> {
        let read_error = |source| InputFormatError::Read {
            path: path.display().to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(format.delimiter)
            .flexible(true)
            .has_headers(true)
            .from_path(path)
            .map_err(read_error)?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(read_error)?
            .iter()
            .map(str::to_string)
            .collect();

        let source_idx = find_column(&headers, &format.source_column, path)?;
        let target_idx = find_column(&headers, &format.target_column, path)?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            match record {
                Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
                Err(err) => {
                    warn!(path = %path.display(), row = index, "skipping malformed row: {err}");
                }
            }
        }

        Ok(Self {
            headers,
            source_idx,
            target_idx,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn source(&self, row: usize) -> &str {
        self.cell(row, self.source_idx)
    }

    pub fn target(&self, row: usize) -> &str {
        self.cell(row, self.target_idx)
    }

    /// Overwrite the target cell of `row`, padding short rows as needed.
    pub fn set_target(&mut self, row: usize, value: String) {
        let record = &mut self.rows[row];
        if record.len() <= self.target_idx {
            record.resize(self.target_idx + 1, String::new());
        }
        record[self.target_idx] = value;
    }

    /// The (source, target) projection of every row, in order.
    pub fn pairs(&self) -> Vec<TranslationPair> {
        (0..self.len())
            .map(|row| TranslationPair {
                source: self.source(row).to_string(),
                target: self.target(row).to_string(),
            })
            .collect()
    }

    /// Write the table to `path` with the same delimiter and column layout
    /// it was read with.
    pub fn write(&self, path: &Path, format: &TableFormat) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(format.delimiter)
            .flexible(true)
            .from_path(path)?;

        writer.write_record(&self.headers)?;
        for record in &self.rows {
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn cell(&self, row: usize, idx: usize) -> &str {
        self.rows[row].get(idx).map(String::as_str).unwrap_or("")
    }
}

fn find_column(headers: &[String], name: &str, path: &Path) -> Result<usize, InputFormatError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| InputFormatError::MissingColumn {
            path: path.display().to_string(),
            column: name.to_string(),
        })
}
