#![cfg(test)]
use crate::*;
use rstest::rstest;

const CURSOR: char = '|';

fn settings(max_suggestions: usize, qualify_columns: bool, include_views: bool) -> Config {
    Config {
        max_suggestions,
        qualify_columns,
        include_views,
    }
}

/// Complete at the `|` marker, which is removed from the document.
fn complete_at(marked: &str, schema: &DatabaseSchema, config: &Config) -> Completion {
    let offset = marked.find(CURSOR).expect("cursor marker");
    let document = marked.replacen(CURSOR, "", 1);
    let position = LineIndex::new(&document).position(offset);
    complete(&document, position, schema, config)
}

fn labels(completion: &Completion) -> Vec<&str> {
    completion.suggestions.iter().map(|s| s.label.as_str()).collect()
}

fn inserts(completion: &Completion) -> Vec<&str> {
    completion.suggestions.iter().map(|s| s.insert_text.as_str()).collect()
}

mod table_testing {
    use super::*;

    #[rstest]
    fn from_offers_tables_and_views(sample_schema: DatabaseSchema) {
        let completion = complete_at("SELECT * FROM |", &sample_schema, &settings(100, true, true));
        assert_eq!(completion.context.clause, Clause::From);
        assert_eq!(
            labels(&completion),
            ["Order Details", "OrderItems", "Orders", "Products", "Users", "ActiveUsers"]
        );
        assert!(inserts(&completion).contains(&"dbo.[Order Details]"));
        assert!(inserts(&completion).contains(&"sales.Products"));
    }

    #[rstest]
    fn views_follow_configuration(sample_schema: DatabaseSchema) {
        let completion = complete_at("SELECT * FROM |", &sample_schema, &settings(100, true, false));
        assert!(completion.suggestions.iter().all(|s| s.kind == SuggestionKind::Table));
    }

    #[rstest]
    fn schema_member_lists_its_objects(sample_schema: DatabaseSchema) {
        let completion = complete_at("SELECT * FROM sales.|", &sample_schema, &settings(100, true, true));
        assert_eq!(labels(&completion), ["Products"]);
        assert_eq!(inserts(&completion), ["Products"]);
    }

    #[rstest]
    fn join_offers_related_tables_with_conditions(sample_schema: DatabaseSchema) {
        let completion = complete_at("SELECT * FROM Orders o JOIN |", &sample_schema, &settings(100, true, true));
        assert_eq!(completion.context.clause, Clause::JoinTable);
        assert_eq!(
            inserts(&completion),
            [
                "dbo.OrderItems oi ON oi.OrderId = o.Id",
                "dbo.Users u ON u.Id = o.UserId"
            ]
        );
        assert!(completion.suggestions.iter().all(|s| s.kind == SuggestionKind::Join));
    }

    #[rstest]
    fn join_aliases_avoid_those_in_use(sample_schema: DatabaseSchema) {
        let completion = complete_at("SELECT * FROM Orders u JOIN |", &sample_schema, &settings(100, true, true));
        assert!(inserts(&completion).contains(&"dbo.Users u2 ON u2.Id = u.UserId"));
    }

    #[rstest]
    fn join_without_relations_offers_plain_tables(sample_schema: DatabaseSchema) {
        let completion = complete_at(
            "SELECT * FROM [Order Details] d LEFT JOIN |",
            &sample_schema,
            &settings(100, true, true),
        );
        assert!(completion.suggestions.iter().all(|s| s.kind == SuggestionKind::Table));
        assert!(inserts(&completion).contains(&"sales.Products p"));
    }
}

mod column_testing {
    use super::*;

    #[rstest]
    fn select_offers_star_columns_and_aggregates(sample_schema: DatabaseSchema) {
        let completion = complete_at("SELECT | FROM Users", &sample_schema, &settings(100, true, true));
        assert_eq!(completion.context.clause, Clause::Select);
        let labels = labels(&completion);
        assert_eq!(labels[..3], ["Email", "Id", "Name"]);
        assert!(labels.contains(&"*"));
        assert!(labels.contains(&"COUNT(*)"));
    }

    #[rstest]
    #[case(true, &["o.Id", "o.Total", "o.UserId", "u.Email", "u.Id", "u.Name"])]
    #[case(false, &["Email", "Id", "Name", "Total", "UserId"])]
    fn columns_are_qualified_when_configured(
        sample_schema: DatabaseSchema,
        #[case] qualify: bool,
        #[case] expected: &[&str],
    ) {
        let completion = complete_at(
            "SELECT * FROM Users u JOIN Orders o ON o.UserId = u.Id ORDER BY |",
            &sample_schema,
            &settings(100, qualify, true),
        );
        assert_eq!(completion.context.clause, Clause::OrderBy);
        assert_eq!(labels(&completion), expected);
    }

    #[rstest]
    fn alias_member_lists_columns(sample_schema: DatabaseSchema) {
        let completion = complete_at(
            "SELECT * FROM Users u WHERE u.|",
            &sample_schema,
            &settings(100, true, true),
        );
        assert_eq!(labels(&completion), ["Email", "Id", "Name"]);
    }

    #[rstest]
    fn partial_member_still_resolves(sample_schema: DatabaseSchema) {
        let completion = complete_at(
            "SELECT o.To| FROM dbo.Orders AS o",
            &sample_schema,
            &settings(100, true, true),
        );
        assert_eq!(labels(&completion), ["Id", "Total", "UserId"]);
    }

    #[rstest]
    fn unknown_member_offers_nothing(sample_schema: DatabaseSchema) {
        let completion = complete_at("SELECT x.| FROM Users u", &sample_schema, &settings(100, true, true));
        assert!(completion.suggestions.is_empty());
    }

    #[rstest]
    fn scope_is_the_statement_under_the_cursor(sample_schema: DatabaseSchema) {
        let completion = complete_at(
            "SELECT * FROM Orders;\nSELECT | FROM Users",
            &sample_schema,
            &settings(100, true, true),
        );
        let columns: Vec<_> = completion
            .suggestions
            .iter()
            .filter(|s| s.kind == SuggestionKind::Column)
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(columns, ["Email", "Id", "Name"]);
    }

    #[rstest]
    fn insert_column_list_offers_target_columns(sample_schema: DatabaseSchema) {
        let completion = complete_at("INSERT INTO dbo.Users (|", &sample_schema, &settings(100, true, true));
        assert_eq!(
            completion.context.clause,
            Clause::InsertColumns { table_name: "Users".into() }
        );
        assert_eq!(labels(&completion), ["Email", "Id", "Name"]);
    }

    #[rstest]
    fn update_set_offers_assignments(sample_schema: DatabaseSchema) {
        let completion = complete_at("UPDATE Users SET |", &sample_schema, &settings(100, true, true));
        assert_eq!(labels(&completion), ["Email", "Name"]);
        assert_eq!(inserts(&completion), ["Email = ", "Name = "]);
    }

    #[rstest]
    fn update_where_sees_the_target(sample_schema: DatabaseSchema) {
        let completion = complete_at(
            "UPDATE Users SET Name = 'x' WHERE |",
            &sample_schema,
            &settings(100, true, true),
        );
        assert_eq!(labels(&completion), ["Email", "Id", "Name"]);
    }
}

mod keyword_testing {
    use super::*;

    #[rstest]
    fn where_operand_offers_operators(sample_schema: DatabaseSchema) {
        let completion = complete_at(
            "SELECT * FROM Users WHERE Name |",
            &sample_schema,
            &settings(100, true, true),
        );
        assert!(completion.context.clause.suggest_operators());
        assert!(completion.suggestions.iter().all(|s| s.kind == SuggestionKind::Operator));
        let between = completion
            .suggestions
            .iter()
            .find(|s| s.label == "BETWEEN")
            .expect("between");
        assert!(between.is_snippet);
        assert_eq!(between.insert_text, "BETWEEN ${1} AND ${2}");
    }

    #[rstest]
    #[case("SELECT * FROM Users |", "WHERE")]
    #[case("SELECT * FROM Users u |", "LEFT JOIN")]
    #[case("|", "SELECT")]
    #[case("SELECT 1;\n|", "INSERT INTO")]
    #[case("INSERT INTO Users (Id) VALUES (|", "NULL")]
    fn offers_keywords(sample_schema: DatabaseSchema, #[case] marked: &str, #[case] expected: &str) {
        let completion = complete_at(marked, &sample_schema, &settings(100, true, true));
        assert!(labels(&completion).contains(&expected), "{:?}", labels(&completion));
        assert!(completion.suggestions.iter().all(|s| s.kind == SuggestionKind::Keyword));
    }

    #[rstest]
    fn output_is_truncated_and_numbered(sample_schema: DatabaseSchema) {
        let completion = complete_at("|", &sample_schema, &settings(3, true, true));
        assert_eq!(labels(&completion), ["ALTER TABLE", "CREATE TABLE", "DECLARE"]);
        let sort_texts: Vec<_> = completion.suggestions.iter().map(|s| s.sort_text.as_str()).collect();
        assert_eq!(sort_texts, ["0000", "0001", "0002"]);
    }

    #[rstest]
    fn process_config_is_used_by_default(sample_schema: DatabaseSchema) {
        let completion = complete_with_defaults("SELECT * FROM ", Position::new(1, 15), &sample_schema);
        assert_eq!(completion.context.clause, Clause::From);
        assert!(!completion.suggestions.is_empty());
    }
}
