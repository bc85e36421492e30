//! This module reads delimited text (CSV, TSV and the like) into columns of raw strings. Comment
//! lines are dropped, rows may have any number of fields, and runs of delimiters count as a single
//! field boundary. Numeric validation is left to the resampler, which skips rows it can't read.

use crate::error::SpectrumError;
use regex::Regex;

/// The character separating fields within a line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delimiter {
    /// `,`, as in CSV files.
    Comma,
    /// `\t`, as in most spectrometer exports.
    Tab,
    /// Any other single character, such as `;`.
    Other(char),
}

impl Default for Delimiter {
    fn default() -> Delimiter {
        Delimiter::Comma
    }
}

impl Delimiter {
    /// The character this delimiter stands for.
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Other(c) => c,
        }
    }

    // A field is a maximal run of characters that are not the delimiter.
    fn field_pattern(self) -> Result<Regex, SpectrumError> {
        let c = self.as_char();
        if c == '\n' || c == '\r' {
            return Err(SpectrumError::InvalidDelimiter(c));
        }
        Regex::new(&format!("[^{}]+", regex::escape(&c.to_string())))
            .map_err(|_| SpectrumError::InvalidDelimiter(c))
    }
}

/// Delimited text stored column by column. Column `j` holds the `j`-th field of every data line that
/// had at least `j + 1` fields, in file order; shorter rows simply don't contribute to the columns
/// they lack.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table directly from columns, for data that was never text to begin with.
    pub fn from_columns(columns: Vec<Vec<String>>) -> Table {
        Table { columns }
    }

    /// The number of columns, which is the width of the widest row.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// The cells of column `index`, if the table is that wide.
    pub fn column(&self, index: usize) -> Option<&[String]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Like [`column`](Table::column), but reports a missing column as an error.
    pub fn require_column(&self, index: usize) -> Result<&[String], SpectrumError> {
        self.column(index).ok_or(SpectrumError::MissingColumn {
            index,
            available: self.width(),
        })
    }

    /// Consumes the table, returning the raw columns.
    pub fn into_columns(self) -> Vec<Vec<String>> {
        self.columns
    }
}

/// Parses delimited text into a [`Table`]. Lines whose very first character is `#` are comments and
/// are ignored entirely. Every other line is cut into the maximal runs of non-delimiter characters,
/// so `"1,,2"` has two fields, not three.
///
/// # Errors
/// Returns [`SpectrumError::Parse`] if the widest row has fewer than two fields: either the file is
/// not tabular or the delimiter is wrong. No cell is checked for being numeric.
pub fn parse_delimited(text: &str, delimiter: Delimiter) -> Result<Table, SpectrumError> {
    let field = delimiter.field_pattern()?;
    let mut columns: Vec<Vec<String>> = Vec::new();
    let mut rows = 0usize;

    for line in text.lines().filter(|line| !line.starts_with('#')) {
        let mut width = 0;
        for (j, cell) in field.find_iter(line).enumerate() {
            if j == columns.len() {
                columns.push(Vec::new());
            }
            columns[j].push(cell.as_str().to_owned());
            width = j + 1;
        }
        if width > 0 {
            rows += 1;
        }
    }

    if columns.len() < 2 {
        return Err(SpectrumError::Parse {
            widest: columns.len(),
        });
    }
    debug!(rows, columns = columns.len(), "parsed delimited table");
    Ok(Table { columns })
}
