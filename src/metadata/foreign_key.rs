use super::*;
use serde::{Deserialize, Serialize};

/// A single-column foreign key, pointing from the referencing column to the
/// referenced one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyInfo {
    pub from_schema: String,
    pub from_table: String,
    pub from_column: String,
    pub to_schema: String,
    pub to_table: String,
    pub to_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_name: Option<String>,
}

impl ForeignKeyInfo {
    pub fn new(
        (from_schema, from_table, from_column): (&str, &str, &str),
        (to_schema, to_table, to_column): (&str, &str, &str),
    ) -> Self {
        Self {
            from_schema: from_schema.into(),
            from_table: from_table.into(),
            from_column: from_column.into(),
            to_schema: to_schema.into(),
            to_table: to_table.into(),
            to_column: to_column.into(),
            constraint_name: None,
        }
    }

    pub fn named(self, constraint_name: impl Into<String>) -> Self {
        Self {
            constraint_name: Some(constraint_name.into()),
            ..self
        }
    }

    /// The referencing side is `table`.
    pub fn starts_at(&self, table: &TableInfo) -> bool {
        table.is_named(Some(&self.from_schema), &self.from_table)
    }

    /// The referenced side is `table`.
    pub fn ends_at(&self, table: &TableInfo) -> bool {
        table.is_named(Some(&self.to_schema), &self.to_table)
    }
}

impl std::fmt::Display for ForeignKeyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.constraint_name {
            Some(name) => f.write_str(name),
            None => write!(
                f,
                "{}.{}.{} -> {}.{}.{}",
                self.from_schema,
                self.from_table,
                self.from_column,
                self.to_schema,
                self.to_table,
                self.to_column
            ),
        }
    }
}
