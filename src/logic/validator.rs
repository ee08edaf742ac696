//! Schema validation of FROM/JOIN targets.
use super::*;
use crate::*;
use std::collections::HashSet;

/// Check every FROM/JOIN target of `script` against `schema`.
///
/// Comments are blanked before scanning, temp tables and the statement's own
/// CTEs are exempt, and a name must otherwise resolve to a table, view or
/// table-valued function. An empty snapshot means the schema is not loaded
/// yet and nothing is reported.
pub fn validate_sql(script: &str, schema: &DatabaseSchema) -> Vec<ValidationMarker> {
    if schema.is_empty() {
        debug!("Schema not loaded, skipping validation");
        return Vec::new();
    }

    let lines = LineIndex::new(script);
    let markers: Vec<_> = split_statements(script)
        .iter()
        .flat_map(|statement| validate_statement(statement, schema, &lines))
        .collect();
    debug!("Validated script of {} bytes: {} marker(s)", script.len(), markers.len());
    markers
}

fn validate_statement(
    statement: &SqlStatement,
    schema: &DatabaseSchema,
    lines: &LineIndex,
) -> Vec<ValidationMarker> {
    let masked = mask_comments(&statement.text);
    let ctes = extract_ctes(&masked);

    find_table_references(&masked)
        .into_iter()
        .filter(|reference| !is_known(reference, &ctes, schema))
        .map(|reference| {
            let start = statement.start_offset + reference.start_index;
            ValidationMarker::error(
                format!("Invalid object name '{}'.", reference.table),
                lines.position(start),
                lines.position(start + reference.length),
            )
        })
        .collect()
}

/// Whether `reference` needs no schema entry or has one.
pub fn is_known(reference: &TableReference, ctes: &HashSet<String>, schema: &DatabaseSchema) -> bool {
    let name = &reference.table;
    let qualifier = reference.schema.as_deref();

    let known = reference.is_temp
        || (qualifier.is_none() && ctes.contains(&name.to_lowercase()))
        || schema.find_object(qualifier, name).is_some()
        || schema.has_function(qualifier, name);
    if !known {
        trace!(?qualifier, name, "Unresolved reference");
    }
    known
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(markers: &[ValidationMarker]) -> Vec<&str> {
        markers.iter().map(|m| m.message.as_str()).collect()
    }

    #[rstest]
    #[case("SELECT * FROM Users")]
    #[case("SELECT * FROM users u JOIN dbo.ORDERS o ON o.UserId = u.Id")]
    #[case("SELECT * FROM [dbo].[Order Details]")]
    #[case("SELECT * FROM sales.Products")]
    #[case("SELECT * FROM ActiveUsers")]
    #[case("SELECT * FROM #scratch; SELECT * FROM ##shared")]
    #[case("SELECT * FROM fnRecentOrders")]
    #[case("SELECT * FROM dbo.fnRecentOrders(7)")]
    #[case("SELECT * FROM Users -- JOIN Ghosts g ON 1 = 1")]
    #[case("SELECT * FROM Users /* FROM Phantoms */")]
    fn accepts_known_objects(sample_schema: DatabaseSchema, #[case] script: &str) {
        assert!(validate_sql(script, &sample_schema).is_empty(), "{script}");
    }

    #[rstest]
    fn flags_unknown_table(sample_schema: DatabaseSchema) {
        let markers = validate_sql("SELECT * FROM NonExistentTable", &sample_schema);
        assert_eq!(messages(&markers), ["Invalid object name 'NonExistentTable'."]);
        assert_eq!(markers[0].severity, Severity::Error);
        assert_eq!(markers[0].start(), Position::new(1, 15));
        assert_eq!(markers[0].end(), Position::new(1, 31));
    }

    #[rstest]
    #[case("SELECT * FROM sales.Users", "Users")]
    #[case("SELECT * FROM [nope].[Order Details]", "Order Details")]
    fn qualified_names_need_the_exact_schema(
        sample_schema: DatabaseSchema,
        #[case] script: &str,
        #[case] table: &str,
    ) {
        let markers = validate_sql(script, &sample_schema);
        assert_eq!(messages(&markers), [format!("Invalid object name '{table}'.")]);
    }

    #[rstest]
    #[case("SELECT * FROM Products", &[])]
    #[case("SELECT * FROM dbo.Products", &["Invalid object name 'Products'."])]
    #[case("SELECT * FROM SALES.products", &[])]
    fn unqualified_names_match_any_schema(
        sample_schema: DatabaseSchema,
        #[case] script: &str,
        #[case] expected: &[&str],
    ) {
        assert_eq!(messages(&validate_sql(script, &sample_schema)), expected);
    }

    #[rstest]
    fn ctes_are_exempt_within_their_statement(sample_schema: DatabaseSchema) {
        let script = "WITH MyCTE AS (SELECT * FROM Users) SELECT * FROM MyCTE;\nSELECT * FROM MyCTE";
        let markers = validate_sql(script, &sample_schema);
        assert_eq!(messages(&markers), ["Invalid object name 'MyCTE'."]);
        assert_eq!(markers[0].start(), Position::new(2, 15));
    }

    #[rstest]
    fn qualified_cte_name_is_not_exempt(sample_schema: DatabaseSchema) {
        let markers = validate_sql("WITH x AS (SELECT 1 AS a) SELECT * FROM dbo.x", &sample_schema);
        assert_eq!(messages(&markers), ["Invalid object name 'x'."]);
    }

    #[rstest]
    fn positions_span_lines_and_statements(sample_schema: DatabaseSchema) {
        let script = "SELECT 1;\n\nSELECT *\n  FROM   [dbo].[Missing] m\n  JOIN Users u ON 1 = 1";
        let markers = validate_sql(script, &sample_schema);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].start(), Position::new(4, 10));
        assert_eq!(markers[0].end(), Position::new(4, 25));
    }

    #[rstest]
    fn columns_count_characters(sample_schema: DatabaseSchema) {
        let markers = validate_sql("SELECT 'Größe' FROM Nope", &sample_schema);
        assert_eq!(markers[0].start(), Position::new(1, 21));
    }

    #[test]
    fn unloaded_schema_reports_nothing() {
        assert!(validate_sql("SELECT * FROM Anything", &DatabaseSchema::new()).is_empty());
    }

    #[rstest]
    fn reports_each_miss_in_order(sample_schema: DatabaseSchema) {
        let markers = validate_sql(
            "SELECT * FROM A JOIN Users u ON 1 = 1 JOIN B ON 1 = 1; UPDATE x SET a = 1 FROM C",
            &sample_schema,
        );
        assert_eq!(
            messages(&markers),
            [
                "Invalid object name 'A'.",
                "Invalid object name 'B'.",
                "Invalid object name 'C'."
            ]
        );
    }
}
