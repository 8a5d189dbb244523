use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Column holding the nested location record in a raw current-conditions
/// response.
pub const LOCATION_COLUMN: &str = "location";

// Leading metadata columns the by-name reshape skips alongside the
// location record.
const METADATA_COLUMNS: &[&str] = &["mac", "time"];

/// How [`ReadingTable::flatten_current`] decides which raw columns are
/// measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReshapeMode {
    /// Skip the location column and known metadata columns by name, keep
    /// everything else. The default.
    #[default]
    ByName,
    /// Drop the first three columns of the row, as the original client did.
    /// Tied to the historical column order of the upstream schema; kept for
    /// bit-exact parity with it.
    Positional,
}

/// A decoded JSON response: an ordered set of named columns with one or
/// more rows of mixed-type values.
///
/// Deliberately lightweight; rows live only for the duration of a call, so
/// a full dataframe engine would be overkill.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ReadingTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at `row` in the column named `column`, if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// One map per row, keyed by column name. Handy for serialization.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// Decode a JSON body into a table.
    ///
    /// Accepts the layouts the RainWise endpoints produce:
    /// - an array of record objects, one per row;
    /// - an object whose values are equal-length arrays (columnar);
    /// - any other object, treated as a single row with one column per key.
    ///
    /// Column order follows JSON key order.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Self::from_records(items),
            Value::Object(map) if !map.is_empty() && map.values().all(Value::is_array) => {
                Self::from_columnar(map)
            }
            Value::Object(map) => {
                let columns = map.keys().cloned().collect();
                let row = map.into_iter().map(|(_, v)| v).collect();
                Ok(Self::new(columns, vec![row]))
            }
            other => Err(Error::Decode(format!(
                "expected a JSON object or array of records at the top level, got {other}"
            ))),
        }
    }

    fn from_records(items: Vec<Value>) -> Result<Self> {
        let mut columns: Vec<String> = Vec::new();
        let mut records = Vec::with_capacity(items.len());

        for item in items {
            let Value::Object(map) = item else {
                return Err(Error::Decode(
                    "every element of a record array must be a JSON object".to_string(),
                ));
            };
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
            records.push(map);
        }

        let rows = records
            .into_iter()
            .map(|mut map| {
                columns
                    .iter()
                    .map(|c| map.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self::new(columns, rows))
    }

    fn from_columnar(map: Map<String, Value>) -> Result<Self> {
        let mut columns = Vec::with_capacity(map.len());
        let mut arrays = Vec::with_capacity(map.len());

        for (key, value) in map {
            if let Value::Array(items) = value {
                columns.push(key);
                arrays.push(items);
            }
        }

        let len = arrays.first().map_or(0, Vec::len);
        if arrays.iter().any(|a| a.len() != len) {
            return Err(Error::Decode(
                "column arrays have mismatched lengths".to_string(),
            ));
        }

        let mut iters: Vec<_> = arrays.into_iter().map(Vec::into_iter).collect();
        let mut rows = Vec::with_capacity(len);
        for _ in 0..len {
            rows.push(
                iters
                    .iter_mut()
                    .map(|it| it.next().unwrap_or(Value::Null))
                    .collect(),
            );
        }

        Ok(Self::new(columns, rows))
    }

    /// Merge the nested location record of a raw current-conditions response
    /// with its flat measurement columns into a single one-row table.
    ///
    /// Location fields come first, measurement fields after, each group in
    /// its original order. Only the first row is consulted; the current
    /// endpoint never returns more than one.
    pub fn flatten_current(&self, mode: ReshapeMode) -> Result<ReadingTable> {
        let row = self
            .rows
            .first()
            .ok_or_else(|| Error::Shape("response contained no rows".to_string()))?;

        let location_idx = self.column_index(LOCATION_COLUMN).ok_or_else(|| {
            Error::Shape(format!("no '{LOCATION_COLUMN}' column in response"))
        })?;

        let location = row
            .get(location_idx)
            .and_then(Value::as_object)
            .ok_or_else(|| {
                Error::Shape(format!("'{LOCATION_COLUMN}' column is not a JSON object"))
            })?;

        let mut columns = Vec::with_capacity(location.len() + self.columns.len());
        let mut values = Vec::with_capacity(location.len() + self.columns.len());

        for (name, value) in location {
            columns.push(name.clone());
            values.push(value.clone());
        }

        for (idx, name) in self.columns.iter().enumerate() {
            let keep = match mode {
                ReshapeMode::Positional => idx >= 3,
                ReshapeMode::ByName => {
                    idx != location_idx && !METADATA_COLUMNS.contains(&name.as_str())
                }
            };
            if keep {
                columns.push(name.clone());
                values.push(row.get(idx).cloned().unwrap_or(Value::Null));
            }
        }

        Ok(ReadingTable::new(columns, vec![values]))
    }
}
