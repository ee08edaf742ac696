use super::*;
use serde::{Deserialize, Serialize};

/// A table or view and its columns, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    pub schema: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}

/// Views share the table shape.
pub type ViewInfo = TableInfo;

impl TableInfo {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: ColumnInfo) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnInfo>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Whether this object answers to `[schema.]name`.
    ///
    /// An omitted schema matches any schema; a given one must match exactly,
    /// ignoring case.
    pub fn is_named(&self, schema: Option<&str>, name: &str) -> bool {
        names_match(&self.name, name) && schema.is_none_or(|s| names_match(&self.schema, s))
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| names_match(&c.name, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "products", true)]
    #[case(Some("SALES"), "Products", true)]
    #[case(Some("dbo"), "Products", false)]
    #[case(None, "Product", false)]
    fn matches_lenient_schema(#[case] schema: Option<&str>, #[case] name: &str, #[case] expected: bool) {
        let table = TableInfo::new("sales", "Products");
        assert_eq!(table.is_named(schema, name), expected);
    }

    #[test]
    fn keeps_column_order() {
        let table = TableInfo::new("dbo", "Users").with_columns([
            ColumnInfo::new("Id", "int"),
            ColumnInfo::new("Email", "nvarchar"),
            ColumnInfo::new("CreatedAt", "datetime2"),
        ]);
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Id", "Email", "CreatedAt"]);
        assert_eq!(table.column("email").map(|c| c.name.as_str()), Some("Email"));
    }
}
