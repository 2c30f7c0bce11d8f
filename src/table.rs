//! Minimal columnar table carried by each chart layer.

/// A value in a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value.
    Num(f64),
    /// A text value.
    Text(String),
}

impl Value {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Get as string, or None if not text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            Value::Num(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Num(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// A small columnar table. Columns keep insertion order so layer data and
/// schema listings are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<(String, Vec<Value>)>,
    n_rows: usize,
}

impl Table {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric column.
    pub fn add_num_column(&mut self, name: &str, data: &[f64]) {
        let values: Vec<Value> = data.iter().map(|&v| Value::Num(v)).collect();
        self.insert(name, values);
    }

    /// Add a text column.
    pub fn add_text_column(&mut self, name: &str, data: &[&str]) {
        let values: Vec<Value> = data.iter().map(|&s| Value::Text(s.to_string())).collect();
        self.insert(name, values);
    }

    fn insert(&mut self, name: &str, values: Vec<Value>) {
        self.n_rows = self.n_rows.max(values.len());
        if let Some(existing) = self.columns.iter_mut().find(|(n, _)| n == name) {
            existing.1 = values;
        } else {
            self.columns.push((name.to_string(), values));
        }
    }

    /// Get a column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_slice())
    }

    /// Get a column's numeric values (non-numeric entries are skipped).
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<Vec<f64>> {
        self.get(name).map(|col| col.iter().filter_map(Value::as_f64).collect())
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Column names in insertion order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }
}
