use serde::{Deserialize, Serialize};

/// One tabular line as ordered `(column, value)` pairs.
///
/// Column order is preserved so an exported row lines up with the row that
/// was imported. Setting an existing column overwrites it in place; setting a
/// new column appends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `column`, if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((column, value)),
        }
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collects pairs with [`Row::set`]: a repeated column keeps its first
/// position and its last value, so the row has one field per distinct column.
impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.set(column, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_in_place_and_appends_new_columns() {
        let mut row: Row = [("question", "Q"), ("timesAsked", "2"), ("note", "x")]
            .into_iter()
            .collect();

        row.set("timesAsked", "3");
        row.set("correctCount", "1");

        let columns: Vec<_> = row.columns().collect();
        assert_eq!(columns, ["question", "timesAsked", "note", "correctCount"]);
        assert_eq!(row.get("timesAsked"), Some("3"));
        assert_eq!(row.get("correctCount"), Some("1"));
        assert_eq!(row.len(), 4);
    }

    #[test]
    fn duplicate_columns_collapse_to_last_value() {
        let row: Row = [("a", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("a"), Some("2"));
        assert!(!row.contains("b"));
    }
}
