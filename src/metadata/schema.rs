use super::*;
use crate::Result;
use serde::{Deserialize, Serialize};

/// A stored procedure or function, known by name only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineInfo {
    pub schema: String,
    pub name: String,
}

impl RoutineInfo {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

/// Full structural snapshot of one database.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSchema {
    #[serde(default)]
    pub tables: Vec<TableInfo>,
    #[serde(default)]
    pub views: Vec<ViewInfo>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyInfo>,
    #[serde(default)]
    pub stored_procedures: Vec<RoutineInfo>,
    #[serde(default)]
    pub functions: Vec<RoutineInfo>,
}

impl DatabaseSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the host's JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_table(mut self, table: TableInfo) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_view(mut self, view: ViewInfo) -> Self {
        self.views.push(view);
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: ForeignKeyInfo) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    pub fn with_function(mut self, function: RoutineInfo) -> Self {
        self.functions.push(function);
        self
    }

    /// No tables and no views: the host has not delivered a snapshot yet.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.views.is_empty()
    }

    /// Tables first, then views.
    pub fn objects(&self) -> impl Iterator<Item = &TableInfo> {
        self.tables.iter().chain(&self.views)
    }

    pub fn find_table(&self, schema: Option<&str>, name: &str) -> Option<&TableInfo> {
        self.tables.iter().find(|t| t.is_named(schema, name))
    }

    /// First table or view answering to `[schema.]name`.
    pub fn find_object(&self, schema: Option<&str>, name: &str) -> Option<&TableInfo> {
        self.objects().find(|t| t.is_named(schema, name))
    }

    pub fn is_view(&self, object: &TableInfo) -> bool {
        self.views.iter().any(|v| std::ptr::eq(v, object))
    }

    pub fn has_function(&self, schema: Option<&str>, name: &str) -> bool {
        self.functions.iter().any(|f| {
            names_match(&f.name, name) && schema.is_none_or(|s| names_match(&f.schema, s))
        })
    }
}
