use tracing::debug;

use crate::error::FlattenError;
use crate::stats::document::StatsDocument;

/// The per-structure feature table parsed out of a stats document.
///
/// Every cell stays raw text. No numeric coercion happens anywhere in the
/// pipeline, so the CSV output reproduces the file's exact formatting.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    /// Column names, from the ColHeaders line of the specific stats file.
    headers: Vec<String>,
    /// Each data row, one String per field.
    rows: Vec<Vec<String>>,
}

impl FeatureTable {
    /// Tokenize the document's data lines into rows under its declared
    /// column names.
    ///
    /// Rows shorter than the header (blank or truncated trailing lines) are
    /// skipped. Rows wider than the header mean the file does not match its
    /// own declaration, which is a structural fault, not a per-file skip.
    pub fn from_document(doc: &StatsDocument) -> Result<Self, FlattenError> {
        let expected = doc.column_names.len();
        let mut rows = Vec::with_capacity(doc.data_lines.len());

        for (i, line) in doc.data_lines.iter().enumerate() {
            let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            if fields.len() > expected {
                return Err(FlattenError::MalformedRow {
                    line: i + 1,
                    expected,
                    found: fields.len(),
                });
            }
            if fields.len() < expected {
                debug!(
                    row = i + 1,
                    expected,
                    found = fields.len(),
                    "skipping short data row"
                );
                continue;
            }
            rows.push(fields);
        }

        Ok(Self {
            headers: doc.column_names.clone(),
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Values of the named column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<String>, FlattenError> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| FlattenError::MissingColumn {
                name: name.to_string(),
            })?;
        Ok(self.rows.iter().map(|row| row[idx].clone()).collect())
    }

    /// A copy of the table with the named columns removed, the survivors
    /// keeping their relative order.
    pub fn without_columns(&self, drop: &[&str]) -> FeatureTable {
        let keep: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !drop.contains(&h.as_str()))
            .map(|(i, _)| i)
            .collect();

        FeatureTable {
            headers: keep.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    /// Flatten the value matrix column-major: all rows of column 1, then all
    /// rows of column 2, and so on, as one long row.
    pub fn values_column_major(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.headers.len() * self.rows.len());
        for col in 0..self.headers.len() {
            for row in &self.rows {
                out.push(row[col].clone());
            }
        }
        out
    }
}
