//! Aliases, in-scope tables and foreign-key neighbours of a query.
use crate::sql::identifier::ANY_IDENT;
use crate::*;
use itertools::Itertools;
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

/// A schema table referenced by the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInQuery {
    pub schema: String,
    pub table: String,
    /// The explicit alias, or the table name when there is none.
    pub alias: String,
    pub has_explicit_alias: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum Direction {
    /// The query's table holds the foreign key.
    #[display("references")]
    Outgoing,
    /// The related table holds a foreign key to the query's table.
    #[display("referenced by")]
    Incoming,
}

/// How a related table joins onto a table already in the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation<'a> {
    pub foreign_key: &'a ForeignKeyInfo,
    /// Alias of the in-query side.
    pub alias: String,
    pub direction: Direction,
}

impl Relation<'_> {
    /// ON predicate joining the related table, aliased `new_alias`.
    pub fn join_condition(&self, new_alias: &str) -> String {
        let fk = self.foreign_key;
        let (new_column, existing_column) = match self.direction {
            Direction::Outgoing => (&fk.to_column, &fk.from_column),
            Direction::Incoming => (&fk.from_column, &fk.to_column),
        };
        format!(
            "{}.{} = {}.{}",
            quote_identifier(new_alias),
            quote_identifier(new_column),
            quote_identifier(&self.alias),
            quote_identifier(existing_column)
        )
    }
}

/// A table worth joining next, with the relation that suggests it if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedTable<'a> {
    pub table: &'a TableInfo,
    pub relation: Option<Relation<'a>>,
}

/// A FROM/JOIN item as written.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FromItem {
    schema: Option<String>,
    table: String,
    alias: Option<String>,
}

static FROM_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:FROM|JOIN)\s+(?:({ANY_IDENT})\.)?({ANY_IDENT})"))
        .expect("from item pattern")
});

static NEXT_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*,\s*(?:({ANY_IDENT})\.)?({ANY_IDENT})")).expect("next item pattern")
});

static ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^\s+(?:AS\s+)?({ANY_IDENT})")).expect("alias pattern")
});

/// Every FROM/JOIN item of `query`, following comma-separated lists.
fn from_items(query: &str) -> Vec<FromItem> {
    let query = mask_comments(query);
    let mut items = Vec::new();
    for caps in FROM_ITEM.captures_iter(&query) {
        let mut pos = caps.get(0).map_or(0, |m| m.end());
        let mut next = Some(caps);
        while let Some(caps) = next.take() {
            let rest = &query[pos..];
            // `name(...)` is a function call, not a table.
            if !rest.trim_start().starts_with('(') {
                let (item, consumed) = read_item(&caps, rest);
                items.push(item);
                pos += consumed;
            }
            next = NEXT_ITEM.captures(&query[pos..]);
            if let Some(m) = next.as_ref().and_then(|c| c.get(0)) {
                pos += m.end();
            }
        }
    }
    items
}

/// Build the item from its name captures and read an alias from `rest`.
/// Returns the item and how many bytes of `rest` the alias took.
fn read_item(caps: &Captures, rest: &str) -> (FromItem, usize) {
    let alias = ALIAS
        .captures(rest)
        .and_then(|a| a.get(1).map(|name| (a, name)))
        .filter(|(_, name)| !is_alias_stop_word(name.as_str()));
    let item = FromItem {
        schema: caps.get(1).map(|s| strip_brackets(s.as_str()).to_string()),
        table: caps.get(2).map_or_else(String::new, |t| strip_brackets(t.as_str()).to_string()),
        alias: alias.as_ref().map(|(_, name)| strip_brackets(name.as_str()).to_string()),
    };
    let consumed = alias.and_then(|(a, _)| a.get(0)).map_or(0, |m| m.end());
    (item, consumed)
}

/// The table or view `alias` stands for in `query`.
///
/// Matches `[schema.]table [AS] alias` targets first; otherwise `alias` is
/// looked up as a table name itself.
pub fn find_table_for_alias<'a>(query: &str, alias: &str, schema: &'a DatabaseSchema) -> Option<&'a TableInfo> {
    let alias = strip_brackets(alias);
    let aliased = from_items(query)
        .into_iter()
        .find(|item| item.alias.as_deref().is_some_and(|a| names_match(a, alias)))
        .and_then(|item| schema.find_object(item.schema.as_deref(), &item.table));
    if aliased.is_none() {
        trace!(alias, "No aliased target, trying the alias as a table name");
    }
    aliased.or_else(|| schema.find_object(None, alias))
}

/// FROM/JOIN targets of `query` that exist in `schema`, in query order.
///
/// Names come from the snapshot. A target without an alias is known by its
/// table name. Repeated aliases keep their first target.
pub fn extract_tables_from_query(query: &str, schema: &DatabaseSchema) -> Vec<TableInQuery> {
    from_items(query)
        .into_iter()
        .filter_map(|item| {
            let table = schema.find_object(item.schema.as_deref(), &item.table)?;
            Some(TableInQuery {
                schema: table.schema.clone(),
                table: table.name.clone(),
                has_explicit_alias: item.alias.is_some(),
                alias: item.alias.unwrap_or_else(|| table.name.clone()),
            })
        })
        .unique_by(|t| t.alias.to_lowercase())
        .collect()
}

/// Tables to offer after JOIN.
///
/// Follows foreign keys in both directions from every table in `tables` to
/// schema tables not yet in the query. Without any such relation, every table
/// not yet in the query is returned without one.
pub fn get_related_tables<'a>(tables: &[TableInQuery], schema: &'a DatabaseSchema) -> Vec<RelatedTable<'a>> {
    let in_query = |t: &TableInfo| tables.iter().any(|q| t.is_named(Some(&q.schema), &q.table));

    let mut related = Vec::new();
    for table in tables {
        let Some(info) = schema.find_object(Some(&table.schema), &table.table) else {
            continue;
        };
        for fk in &schema.foreign_keys {
            let (target, direction) = match (fk.starts_at(info), fk.ends_at(info)) {
                (true, _) => (schema.find_table(Some(&fk.to_schema), &fk.to_table), Direction::Outgoing),
                (_, true) => (schema.find_table(Some(&fk.from_schema), &fk.from_table), Direction::Incoming),
                _ => continue,
            };
            let Some(target) = target.filter(|t| !in_query(t)) else {
                continue;
            };
            related.push(RelatedTable {
                table: target,
                relation: Some(Relation {
                    foreign_key: fk,
                    alias: table.alias.clone(),
                    direction,
                }),
            });
        }
    }

    if related.is_empty() {
        debug!("No foreign key leads out of the query, offering all remaining tables");
        related = schema
            .tables
            .iter()
            .filter(|t| !in_query(t))
            .map(|table| RelatedTable { table, relation: None })
            .collect();
    }
    related
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(query: &str, schema: &DatabaseSchema) -> Vec<(String, String, bool)> {
        extract_tables_from_query(query, schema)
            .into_iter()
            .map(|t| (t.table, t.alias, t.has_explicit_alias))
            .collect()
    }

    fn owned(rows: &[(&str, &str, bool)]) -> Vec<(String, String, bool)> {
        rows.iter().map(|(t, a, e)| (t.to_string(), a.to_string(), *e)).collect()
    }

    #[rstest]
    #[case("SELECT * FROM Users u", "u", Some("Users"))]
    #[case("SELECT * FROM dbo.Users AS usr WHERE usr.", "USR", Some("Users"))]
    #[case("SELECT * FROM [dbo].[Order Details] [od]", "od", Some("Order Details"))]
    #[case("SELECT * FROM Users u JOIN sales.Products p ON 1 = 1", "p", Some("Products"))]
    #[case("SELECT * FROM Users u, Orders o", "o", Some("Orders"))]
    #[case("SELECT * FROM Users", "Orders", Some("Orders"))]
    #[case("SELECT * FROM Users", "x", None)]
    #[case("SELECT * FROM Ghosts g", "g", None)]
    fn finds_table_for_alias(
        sample_schema: DatabaseSchema,
        #[case] query: &str,
        #[case] alias: &str,
        #[case] expected: Option<&str>,
    ) {
        let found = find_table_for_alias(query, alias, &sample_schema).map(|t| t.name.as_str());
        assert_eq!(found, expected);
    }

    #[rstest]
    fn extracts_aliased_and_plain_tables(sample_schema: DatabaseSchema) {
        let query = "SELECT * FROM Users u\nINNER JOIN dbo.Orders AS o ON o.UserId = u.Id\nJOIN OrderItems ON 1 = 1";
        assert_eq!(
            tables(query, &sample_schema),
            owned(&[
                ("Users", "u", true),
                ("Orders", "o", true),
                ("OrderItems", "OrderItems", false)
            ])
        );
    }

    #[rstest]
    #[case("SELECT * FROM Users WHERE Id = 1", &[("Users", "Users", false)])]
    #[case("SELECT * FROM Users ORDER BY Name", &[("Users", "Users", false)])]
    #[case("SELECT * FROM users u, orders o WHERE 1 = 1", &[("Users", "u", true), ("Orders", "o", true)])]
    #[case("SELECT * FROM Ghosts g JOIN Users u ON 1 = 1", &[("Users", "u", true)])]
    #[case("SELECT * FROM (SELECT 1 AS x) d", &[])]
    #[case("SELECT * FROM Users -- JOIN Orders o", &[("Users", "Users", false)])]
    fn keywords_are_never_aliases(
        sample_schema: DatabaseSchema,
        #[case] query: &str,
        #[case] expected: &[(&str, &str, bool)],
    ) {
        assert_eq!(tables(query, &sample_schema), owned(expected));
    }

    #[rstest]
    fn snapshot_names_replace_written_ones(sample_schema: DatabaseSchema) {
        let found = extract_tables_from_query("SELECT * FROM PRODUCTS", &sample_schema);
        assert_eq!(found[0].schema, "sales");
        assert_eq!(found[0].table, "Products");
        assert_eq!(found[0].alias, "Products");
    }

    #[rstest]
    fn related_tables_follow_keys_both_ways(sample_schema: DatabaseSchema) {
        let in_query = extract_tables_from_query("SELECT * FROM Orders o", &sample_schema);
        let related = get_related_tables(&in_query, &sample_schema);

        let summary: Vec<_> = related
            .iter()
            .map(|r| {
                let relation = r.relation.as_ref().expect("relation");
                let alias = generate_smart_alias(&r.table.name);
                (r.table.name.as_str(), relation.direction, relation.join_condition(&alias))
            })
            .collect();
        assert_eq!(
            summary,
            [
                ("Users", Direction::Outgoing, "u.Id = o.UserId".to_string()),
                ("OrderItems", Direction::Incoming, "oi.OrderId = o.Id".to_string()),
            ]
        );
    }

    #[rstest]
    fn tables_already_joined_are_not_offered(sample_schema: DatabaseSchema) {
        let in_query = extract_tables_from_query("SELECT * FROM Orders o JOIN Users u ON u.Id = o.UserId", &sample_schema);
        let names: Vec<_> = get_related_tables(&in_query, &sample_schema)
            .into_iter()
            .map(|r| r.table.name.as_str())
            .collect();
        assert_eq!(names, ["OrderItems"]);
    }

    #[rstest]
    fn falls_back_to_every_remaining_table(sample_schema: DatabaseSchema) {
        let in_query = extract_tables_from_query("SELECT * FROM [Order Details]", &sample_schema);
        let related = get_related_tables(&in_query, &sample_schema);
        assert!(related.iter().all(|r| r.relation.is_none()));
        let names: Vec<_> = related.iter().map(|r| r.table.name.as_str()).collect();
        assert_eq!(names, ["Users", "Orders", "OrderItems", "Products"]);
    }

    #[test]
    fn join_condition_quotes_odd_names() {
        let fk = ForeignKeyInfo::new(("dbo", "Order Lines", "Order Id"), ("dbo", "Orders", "Id"));
        let relation = Relation {
            foreign_key: &fk,
            alias: "o".into(),
            direction: Direction::Incoming,
        };
        assert_eq!(relation.join_condition("ol"), "ol.[Order Id] = o.Id");
    }
}
