//! Lenient lexical layer shared by validation and completion.
//!
//! Nothing here parses SQL. Every function accepts incomplete or invalid text
//! and degrades to an empty or partial answer instead of failing.
//!
//! Modules:
//! - `token_kind` : Segment classes (code, quoted, bracketed, comments, terminator).
//! - `token`      : A `TokenKind` with its byte span.
//! - `tokenizer`  : Single pass O(n) scanner producing gap-free segments.
//! - `keyword`    : The clause keywords the analyzer cares about.
//! - `identifier` : Identifier spellings and bracket quoting.
//! - `statement`  : Script splitting on top-level semicolons.
//! - `mask`       : Offset-preserving comment blanking.
//! - `cte`        : Names defined by a leading `WITH`.
//! - `reference`  : FROM/JOIN targets of one statement.
//!
//! Offsets are byte offsets throughout and always land on char boundaries.
//!
//! ```rust
//! use sqlintel::*;
//!
//! let script = "WITH recent AS (SELECT 1 AS x) SELECT * FROM recent; SELECT * FROM dbo.Users";
//! let statements = split_statements(script);
//! assert_eq!(statements.len(), 2);
//! assert!(extract_ctes(&statements[0].text).contains("recent"));
//! assert_eq!(find_table_references(&statements[1].text)[0].table, "Users");
//! ```

pub mod cte;
pub mod identifier;
pub mod keyword;
pub mod mask;
pub mod reference;
pub mod statement;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use cte::{extract_ctes, matching_paren};
pub use identifier::{quote_identifier, strip_brackets};
pub use keyword::{Keyword, is_alias_stop_word};
pub use mask::mask_comments;
pub use reference::{
    Candidate, ReferencePattern, TableReference, collect_candidates, dedupe_candidates,
    find_table_references,
};
pub use statement::{SqlStatement, current_statement, split_statements, statement_at};
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::tokenize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commented_out_references_disappear_after_masking() {
        let statement = "SELECT * FROM Users -- JOIN Ghosts g\n/* FROM Phantoms */ JOIN Orders o ON 1 = 1";
        let masked = mask_comments(statement);
        let tables: Vec<_> = find_table_references(&masked)
            .into_iter()
            .map(|r| r.table)
            .collect();
        assert_eq!(tables, ["Users", "Orders"]);
    }

    #[test]
    fn segments_reassemble_input() {
        let sql = "SELECT 'a' + [b c] -- x\n/* y */;";
        let rebuilt: String = tokenize(sql).iter().map(|t| t.text(sql)).collect();
        assert_eq!(rebuilt, sql);
    }
}
