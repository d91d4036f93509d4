//! Vendor-neutral tabular provider response.
//!
//! A [`PriceFrame`] is what a [`DataProvider`](crate::providers::DataProvider)
//! hands back: a date index plus named columns of optional values. Batch-style
//! providers key each column by `(field, symbol)` even for a single-symbol
//! request; [`PriceFrame::flatten`] collapses that to plain field names.

use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use thiserror::Error;

/// Name of the implicit index column when listing available columns.
pub const DATE_COLUMN: &str = "Date";

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("column {column} has {actual} rows, index has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// Key of one column: the field name plus an optional symbol level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    pub field: String,
    pub symbol: Option<String>,
}

impl ColumnKey {
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            symbol: None,
        }
    }

    pub fn with_symbol(field: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            symbol: Some(symbol.into()),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "({}, {})", self.field, symbol),
            None => f.write_str(&self.field),
        }
    }
}

/// Date-indexed table of optional values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceFrame {
    index: Vec<NaiveDate>,
    columns: IndexMap<ColumnKey, Vec<Option<f64>>>,
}

impl PriceFrame {
    pub fn new(index: Vec<NaiveDate>) -> Self {
        Self {
            index,
            columns: IndexMap::new(),
        }
    }

    /// A frame with no rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a column, replacing any existing column with the same key.
    pub fn push_column(
        &mut self,
        key: ColumnKey,
        values: Vec<Option<f64>>,
    ) -> Result<(), FrameError> {
        if values.len() != self.index.len() {
            return Err(FrameError::LengthMismatch {
                column: key.to_string(),
                expected: self.index.len(),
                actual: values.len(),
            });
        }
        self.columns.insert(key, values);
        Ok(())
    }

    /// Builder-style [`push_column`](Self::push_column).
    pub fn with_column(
        mut self,
        key: ColumnKey,
        values: Vec<Option<f64>>,
    ) -> Result<Self, FrameError> {
        self.push_column(key, values)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    /// True when any column carries a symbol level.
    pub fn is_multi_level(&self) -> bool {
        self.columns.keys().any(|k| k.symbol.is_some())
    }

    /// Collapses multi-level keys to their field level.
    ///
    /// When several symbols share a field, the first column in order wins.
    pub fn flatten(self) -> Self {
        let mut columns: IndexMap<ColumnKey, Vec<Option<f64>>> =
            IndexMap::with_capacity(self.columns.len());
        for (key, values) in self.columns {
            columns.entry(ColumnKey::field(key.field)).or_insert(values);
        }
        Self {
            index: self.index,
            columns,
        }
    }

    /// Looks up a single-level column by field name.
    pub fn column(&self, field: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(k, _)| k.symbol.is_none() && k.field == field)
            .map(|(_, v)| v.as_slice())
    }

    pub fn has_column(&self, field: &str) -> bool {
        self.column(field).is_some()
    }

    /// Column names as a caller would see them after the index is reset:
    /// the date column first, then each column in insertion order.
    pub fn column_names(&self) -> Vec<String> {
        std::iter::once(DATE_COLUMN.to_string())
            .chain(self.columns.keys().map(ToString::to_string))
            .collect()
    }
}
