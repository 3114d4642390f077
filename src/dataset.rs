//! A small CSV-backed table of string cells.
//!
//! Every stage reads a table, adds or rewrites a few columns and writes a new
//! table. Empty cells are treated as missing values, and columns produced by
//! earlier stages may be absent altogether.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;

pub const COL_DOC_ID: &str = "doc_id";
pub const COL_URL: &str = "url";
pub const COL_CACHE: &str = "cache";
/// Download URL of the document text.
pub const COL_TEXT_VERSION: &str = "text version";
pub const COL_NATURE: &str = "nature";
/// Date shipped with the source dataset.
pub const COL_PUBLISHED: &str = "published";
pub const COL_ENTITY: &str = "entity";
pub const COL_ENTITY_TYPE: &str = "entity_type";
pub const COL_GOLD_LABEL: &str = "Gold_label";
pub const COL_LOCAL_FILENAME: &str = "local_filename";
pub const COL_TEXT_CONTENT: &str = "text_content";
pub const COL_RAW_TEXT_CONTENT: &str = "raw_text_content";
pub const COL_TIME_LIST: &str = "time_list";
pub const COL_PREDICTED_TIME: &str = "predicted_time";
pub const COL_PREDICTION_IN_CANDIDATES: &str = "prediction_in_candidates";
pub const COL_EXTRACTED_DATE: &str = "extracted_date";
pub const COL_CLEANED_PREDICTION_DATE: &str = "cleaned_prediction_date";
pub const COL_CLEANED_GOLD_LABEL: &str = "cleaned_gold_label";
pub const COL_PREDICTED_DATE: &str = "predicted_date";
pub const COL_GOLD_LABEL_CLEAN: &str = "gold_label";
pub const COL_GIVEN_ACC: &str = "given_acc";
pub const COL_OUR_PREDICTION_ACC: &str = "our_prediction_acc";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>) -> Self {
        Dataset {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open dataset {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("Failed to read dataset {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let headers: Vec<String> = csv_reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (idx, record) in csv_reader.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV row {}", idx + 1))?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Dataset { headers, rows })
    }

    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        self.to_writer(file)
            .with_context(|| format!("Failed to write dataset {}", path.display()))
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell at (`row`, `column`); empty cells and absent columns read as `None`.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(idx))
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }

    /// All values of a column, in row order.
    pub fn column(&self, name: &str) -> Vec<Option<&str>> {
        (0..self.len()).map(|row| self.value(row, name)).collect()
    }

    /// Add an empty column unless it already exists; returns its index.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }

    /// Set a cell, creating the column if needed. `None` clears the cell.
    pub fn set_value(&mut self, row: usize, column: &str, value: Option<&str>) {
        let idx = self.ensure_column(column);
        if let Some(cells) = self.rows.get_mut(row) {
            cells[idx] = value.unwrap_or_default().to_string();
        }
    }

    /// Fill a whole column from per-row values.
    pub fn set_column<S: AsRef<str>>(&mut self, column: &str, values: &[Option<S>]) {
        let idx = self.ensure_column(column);
        for (cells, value) in self.rows.iter_mut().zip(values) {
            cells[idx] = value.as_ref().map(|v| v.as_ref().to_string()).unwrap_or_default();
        }
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Keep only the rows whose index satisfies `keep`.
    pub fn retain_rows<F: FnMut(usize) -> bool>(&mut self, mut keep: F) {
        let rows = std::mem::take(&mut self.rows);
        self.rows = rows
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| keep(*idx))
            .map(|(_, row)| row)
            .collect();
    }

    /// A new table with the listed columns in that order. Absent columns are
    /// skipped.
    pub fn project(&self, columns: &[&str]) -> Dataset {
        let indices: Vec<usize> = columns
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();
        Dataset {
            headers: indices.iter().map(|&idx| self.headers[idx].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
                .collect(),
        }
    }

    /// Rename a column if present; returns whether it was found.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.headers[idx] = to.to_string();
                true
            }
            None => false,
        }
    }
}
