//! Context-aware completion for a document and cursor position.
crate::reexport!(context);
crate::reexport!(resolver);
crate::reexport!(alias);
crate::reexport!(suggestion);
crate::reexport!(suggestion_tests, test);

use crate::sql::identifier::ANY_IDENT;
use crate::*;
use regex::Regex;
use std::sync::LazyLock;

/// The cursor's clause together with what to offer there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub context: SqlContext,
    pub suggestions: Suggestions,
}

/// `qualifier.` with an optional partial member name, at the end of the line.
static MEMBER_ACCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({ANY_IDENT})\.[\p{{L}}\p{{N}}_$@#]*$")).expect("member access pattern")
});

static UPDATE_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bupdate\s+(?:({ANY_IDENT})\.)?({ANY_IDENT})")).expect("update target pattern")
});

/// Suggestions for the cursor at `position` in `document`.
///
/// Scope (tables, aliases) comes from the whole statement around the cursor,
/// the clause from the text before it. Malformed SQL yields fewer
/// suggestions, never an error.
pub fn complete(document: &str, position: Position, schema: &DatabaseSchema, config: &Config) -> Completion {
    let offset = LineIndex::new(document).offset(position);
    let before = &document[..offset];
    let line = before.rsplit('\n').next().unwrap_or(before);
    let statement = statement_at(document, offset);
    let context = analyze_sql_context(before, line);

    let suggestions = match MEMBER_ACCESS.captures(line) {
        Some(caps) => members(&caps[1], &context.clause, &statement.text, schema, config),
        None => for_clause(&context.clause, &statement.text, schema, config),
    };
    let suggestions = rank(suggestions, config.max_suggestions);
    debug!(
        clause = %context.clause,
        count = suggestions.len(),
        "Completed at {position}"
    );
    Completion { context, suggestions }
}

/// [`complete`] with the process-wide [`config`].
pub fn complete_with_defaults(document: &str, position: Position, schema: &DatabaseSchema) -> Completion {
    complete(document, position, schema, config())
}

/// After `qualifier.`: objects of a schema where a table is expected, else
/// the columns of the table the qualifier names.
fn members(qualifier: &str, clause: &Clause, query: &str, schema: &DatabaseSchema, config: &Config) -> Suggestions {
    let qualifier = strip_brackets(qualifier);
    if clause.expects_table() {
        let in_schema = schema.objects().filter(|o| names_match(&o.schema, qualifier));
        return objects(in_schema, schema, config.include_views)
            .into_iter()
            .map(|s| {
                let name = quote_identifier(&s.label);
                s.with_insert_text(name)
            })
            .collect();
    }
    match find_table_for_alias(query, qualifier, schema) {
        Some(table) => table
            .columns
            .iter()
            .map(|c| Suggestion::column(c, table, None))
            .collect(),
        None => {
            trace!(qualifier, "Qualifier names nothing in scope");
            Vec::new()
        }
    }
}

fn for_clause(clause: &Clause, query: &str, schema: &DatabaseSchema, config: &Config) -> Suggestions {
    let in_scope = || tables_in_scope(query, schema);
    let columns = || columns_in_scope(&in_scope(), schema, config.qualify_columns);

    match clause {
        Clause::JoinTable => {
            let in_query = in_scope();
            joins(&get_related_tables(&in_query, schema), &in_query)
        }
        Clause::From => objects(schema.objects(), schema, config.include_views),
        Clause::AfterFrom => keywords(AFTER_FROM_KEYWORDS),
        Clause::Select => {
            let mut out = vec![Suggestion::keyword("*")];
            out.extend(columns());
            out.extend(aggregates());
            out
        }
        Clause::Where { suggest_operators: true } | Clause::Having { suggest_operators: true } => operators(),
        Clause::Where { .. } => columns(),
        Clause::Having { .. } => {
            let mut out = columns();
            out.extend(aggregates());
            out
        }
        Clause::OnCondition | Clause::OrderBy | Clause::GroupBy => columns(),
        Clause::InsertColumns { table_name } => schema
            .find_object(None, table_name)
            .map(|table| {
                table
                    .columns
                    .iter()
                    .map(|c| Suggestion::column(c, table, None))
                    .collect()
            })
            .unwrap_or_default(),
        Clause::InsertValues => keywords(&["NULL", "DEFAULT"]),
        Clause::UpdateSet => update_target(query, schema)
            .map(|table| {
                table
                    .columns
                    .iter()
                    .filter(|c| !c.is_primary_key)
                    .map(|c| {
                        let name = quote_identifier(&c.name);
                        Suggestion::column(c, table, None).with_insert_text(format!("{name} = "))
                    })
                    .collect()
            })
            .unwrap_or_default(),
        Clause::Default => keywords(STATEMENT_KEYWORDS),
    }
}

/// FROM/JOIN tables, or the UPDATE target for statements without FROM.
fn tables_in_scope(query: &str, schema: &DatabaseSchema) -> Vec<TableInQuery> {
    let tables = extract_tables_from_query(query, schema);
    if !tables.is_empty() {
        return tables;
    }
    update_target(query, schema)
        .map(|t| TableInQuery {
            schema: t.schema.clone(),
            table: t.name.clone(),
            alias: t.name.clone(),
            has_explicit_alias: false,
        })
        .into_iter()
        .collect()
}

fn update_target<'a>(query: &str, schema: &'a DatabaseSchema) -> Option<&'a TableInfo> {
    let caps = UPDATE_TARGET.captures(query)?;
    let qualifier = caps.get(1).map(|s| strip_brackets(s.as_str()));
    let name = strip_brackets(caps.get(2)?.as_str());
    schema
        .find_table(qualifier, name)
        .or_else(|| find_table_for_alias(query, name, schema))
}
