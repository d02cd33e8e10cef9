//! Tabular datasets that role mappings are checked against
//!
//! Copyright (c) 2025 Visrole Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A data source whose columns mapped fields must refer to
pub trait Dataset {
    /// Whether a column with exactly this name exists
    fn has_column(&self, name: &str) -> bool;
}

/// Value type of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
    Date,
    Boolean,
}

/// A column definition of a [`Table`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A table row; `c` holds one cell per column
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub c: Vec<Value>,
}

/// An in-memory table described by a column model and rows
///
/// ```rust
/// use visrole_core::{Dataset, Table};
/// use serde_json::json;
///
/// let table = Table::from_spec(&json!({
///     "model": [{"name": "country", "type": "string", "label": "Country"}],
///     "rows": [{"c": ["Portugal"]}]
/// })).unwrap();
///
/// assert!(table.has_column("country"));
/// assert!(!table.has_column("sales"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub model: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a table from its JSON specification
    pub fn from_spec(spec: &Value) -> Result<Self> {
        let table: Table = serde_json::from_value(spec.clone()).map_err(|e| {
            Error::invalid_configuration_with_source("$.data", "invalid table specification", e)
        })?;

        table.check_rows()?;
        Ok(table)
    }

    /// Reject rows carrying more cells than there are columns
    pub fn check_rows(&self) -> Result<()> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.c.len() > self.model.len() {
                return Err(Error::invalid_configuration(
                    format!("$.data.rows[{}]", i),
                    format!(
                        "row has {} cells but the table defines {} columns",
                        row.c.len(),
                        self.model.len()
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.model.iter().find(|c| c.name == name)
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.model.iter().map(|c| c.name.as_str())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl Dataset for Table {
    fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}
