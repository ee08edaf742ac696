use crate::*;
use itertools::Itertools;
use serde::Serialize;

/// What a suggestion inserts. The declaration order is the ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    #[display("join")]
    Join,
    #[display("column")]
    Column,
    #[display("table")]
    Table,
    #[display("view")]
    View,
    #[display("operator")]
    Operator,
    #[display("function")]
    Function,
    #[display("keyword")]
    Keyword,
}

/// An autocomplete suggestion. `insert_text` may hold `${n}` placeholders
/// when `is_snippet` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[display("{label}")]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub label: String,
    pub kind: SuggestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub insert_text: String,
    pub is_snippet: bool,
    pub sort_text: String,
}
pub type Suggestions = Vec<Suggestion>;

impl Suggestion {
    pub fn new(kind: SuggestionKind, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            detail: None,
            is_snippet: false,
            sort_text: String::new(),
        }
    }

    pub fn keyword(keyword: &str) -> Self {
        Self::new(SuggestionKind::Keyword, keyword)
    }

    /// A table or view, inserted schema-qualified.
    pub fn object(object: &TableInfo, is_view: bool) -> Self {
        let kind = if is_view { SuggestionKind::View } else { SuggestionKind::Table };
        Self::new(kind, &object.name)
            .with_detail(format!("{kind} in {}", object.schema))
            .with_insert_text(qualified(object))
    }

    /// A column, optionally prefixed with the alias it is reached through.
    pub fn column(column: &ColumnInfo, owner: &TableInfo, qualifier: Option<&str>) -> Self {
        let name = quote_identifier(&column.name);
        let text = match qualifier {
            Some(q) => format!("{}.{name}", quote_identifier(q)),
            None => name,
        };
        let mut detail = format!("{} ({})", column.describe(), owner.name);
        if column.is_primary_key {
            detail.push_str(", PK");
        } else if column.is_foreign_key {
            detail.push_str(", FK");
        }
        Self::new(SuggestionKind::Column, text).with_detail(detail)
    }

    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..self
        }
    }

    pub fn with_insert_text(self, insert_text: impl Into<String>) -> Self {
        Self {
            insert_text: insert_text.into(),
            ..self
        }
    }

    /// Insert `template` as a snippet.
    pub fn snippet(self, template: impl Into<String>) -> Self {
        Self {
            insert_text: template.into(),
            is_snippet: true,
            ..self
        }
    }
}

/// `schema.name`, each part bracketed when needed.
pub(crate) fn qualified(object: &TableInfo) -> String {
    format!(
        "{}.{}",
        quote_identifier(&object.schema),
        quote_identifier(&object.name)
    )
}

/// Words that may follow a complete FROM/JOIN target.
pub const AFTER_FROM_KEYWORDS: &[&str] = &[
    "WHERE",
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "FULL OUTER JOIN",
    "CROSS JOIN",
    "ON",
    "GROUP BY",
    "ORDER BY",
    "HAVING",
    "UNION",
    "UNION ALL",
];

/// Words that may start a statement.
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "SELECT",
    "INSERT INTO",
    "UPDATE",
    "DELETE FROM",
    "WITH",
    "DECLARE",
    "EXEC",
    "CREATE TABLE",
    "ALTER TABLE",
    "DROP TABLE",
];

/// Comparison operators as `(label, insert text)`; placeholders make a snippet.
const OPERATORS: &[(&str, &str)] = &[
    ("=", "= "),
    ("<>", "<> "),
    (">", "> "),
    ("<", "< "),
    (">=", ">= "),
    ("<=", "<= "),
    ("LIKE", "LIKE '${1}%'"),
    ("IN", "IN (${1})"),
    ("BETWEEN", "BETWEEN ${1} AND ${2}"),
    ("IS NULL", "IS NULL"),
    ("IS NOT NULL", "IS NOT NULL"),
];

const AGGREGATES: &[(&str, &str)] = &[
    ("COUNT(*)", "COUNT(*)"),
    ("COUNT", "COUNT(${1})"),
    ("SUM", "SUM(${1})"),
    ("AVG", "AVG(${1})"),
    ("MIN", "MIN(${1})"),
    ("MAX", "MAX(${1})"),
];

fn templated(kind: SuggestionKind, (label, template): (&str, &str)) -> Suggestion {
    let suggestion = Suggestion::new(kind, label);
    if template.contains("${") {
        suggestion.snippet(template)
    } else {
        suggestion.with_insert_text(template)
    }
}

pub(crate) fn keywords(words: &[&str]) -> Suggestions {
    words.iter().map(|w| Suggestion::keyword(w)).collect()
}

pub(crate) fn operators() -> Suggestions {
    OPERATORS
        .iter()
        .map(|&op| templated(SuggestionKind::Operator, op).with_detail("operator"))
        .collect()
}

pub(crate) fn aggregates() -> Suggestions {
    AGGREGATES
        .iter()
        .map(|&agg| templated(SuggestionKind::Function, agg).with_detail("aggregate"))
        .collect()
}

/// Tables, then views unless `include_views` is off.
pub(crate) fn objects<'a>(objects: impl IntoIterator<Item = &'a TableInfo>, schema: &DatabaseSchema, include_views: bool) -> Suggestions {
    objects
        .into_iter()
        .map(|o| (o, schema.is_view(o)))
        .filter(|&(_, is_view)| include_views || !is_view)
        .map(|(o, is_view)| Suggestion::object(o, is_view))
        .collect()
}

/// Every column of every table in scope.
///
/// Columns are alias-qualified when `qualify` is set and the query either
/// aliases a table or reads from more than one.
pub(crate) fn columns_in_scope(tables: &[TableInQuery], schema: &DatabaseSchema, qualify: bool) -> Suggestions {
    let qualify = qualify && (tables.len() > 1 || tables.iter().any(|t| t.has_explicit_alias));
    tables
        .iter()
        .filter_map(|t| schema.find_object(Some(&t.schema), &t.table).map(|info| (t, info)))
        .flat_map(|(t, info)| {
            let qualifier = qualify.then_some(t.alias.as_str());
            info.columns.iter().map(move |c| Suggestion::column(c, info, qualifier))
        })
        .collect()
}

/// One `JOIN` suggestion per related table, with a fresh alias and, when a
/// foreign key links it, the ON predicate.
pub(crate) fn joins(related: &[RelatedTable], in_query: &[TableInQuery]) -> Suggestions {
    let taken: Vec<&str> = in_query.iter().map(|t| t.alias.as_str()).collect();
    related
        .iter()
        .map(|r| {
            let alias = unique_alias(&generate_smart_alias(&r.table.name), &taken);
            let target = format!("{} {}", qualified(r.table), quote_identifier(&alias));
            match &r.relation {
                Some(relation) => {
                    let text = format!("{target} ON {}", relation.join_condition(&alias));
                    Suggestion::new(SuggestionKind::Join, text.clone())
                        .with_detail(format!(
                            "{} {} {} ({})",
                            relation.alias, relation.direction, r.table.name, relation.foreign_key
                        ))
                        .with_insert_text(text)
                }
                None => Suggestion::new(SuggestionKind::Table, format!("{} {}", r.table.name, alias))
                    .with_detail(format!("table in {}", r.table.schema))
                    .with_insert_text(target),
            }
        })
        .collect()
}

/// Order by kind then label, drop repeats, keep at most `max`, and number the
/// survivors through `sort_text`.
pub(crate) fn rank(suggestions: Suggestions, max: usize) -> Suggestions {
    suggestions
        .into_iter()
        .unique_by(|s| (s.kind, s.insert_text.clone()))
        .sorted_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        })
        .take(max)
        .enumerate()
        .map(|(i, s)| Suggestion {
            sort_text: format!("{i:04}"),
            ..s
        })
        .collect()
}
