//! Clause classification for the text left of the cursor.
//!
//! Only the statement being typed is considered. The last occurrence of each
//! governing keyword is located and a fixed precedence chain picks the clause,
//! so the same text always yields the same answer.

use crate::sql::identifier::ANY_IDENT;
use crate::*;
use regex::Regex;
use std::sync::LazyLock;

/// The clause the cursor sits in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Clause {
    #[display("SELECT")]
    Select,
    #[display("FROM")]
    From,
    /// A complete FROM/JOIN target followed by whitespace.
    #[display("AFTER_FROM")]
    AfterFrom,
    #[display("WHERE")]
    Where { suggest_operators: bool },
    #[display("JOIN_TABLE")]
    JoinTable,
    #[display("ON_CONDITION")]
    OnCondition,
    #[display("ORDER_BY")]
    OrderBy,
    #[display("GROUP_BY")]
    GroupBy,
    #[display("HAVING")]
    Having { suggest_operators: bool },
    /// Inside the column list of `INSERT INTO table (`.
    #[display("INSERT_COLUMNS")]
    InsertColumns { table_name: String },
    #[display("INSERT_VALUES")]
    InsertValues,
    #[display("UPDATE_SET")]
    UpdateSet,
    #[display("DEFAULT")]
    Default,
}

impl Clause {
    /// WHERE/HAVING with a bare operand awaiting its operator.
    pub fn suggest_operators(&self) -> bool {
        matches!(
            self,
            Clause::Where { suggest_operators: true } | Clause::Having { suggest_operators: true }
        )
    }

    pub fn table_name(&self) -> Option<&str> {
        match self {
            Clause::InsertColumns { table_name } => Some(table_name),
            _ => None,
        }
    }

    /// Clauses where a table or view name is expected.
    pub fn expects_table(&self) -> bool {
        matches!(self, Clause::From | Clause::JoinTable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[display("high")]
    High,
    #[display("medium")]
    Medium,
    #[display("low")]
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlContext {
    pub clause: Clause,
    pub confidence: Confidence,
}

impl SqlContext {
    pub fn new(clause: Clause, confidence: Confidence) -> Self {
        Self { clause, confidence }
    }

    fn high(clause: Clause) -> Self {
        Self::new(clause, Confidence::High)
    }

    fn medium(clause: Clause) -> Self {
        Self::new(clause, Confidence::Medium)
    }
}

impl Default for SqlContext {
    fn default() -> Self {
        Self::new(Clause::Default, Confidence::Low)
    }
}

/// A name still being typed: plain characters, dots, or an open bracket.
const TYPING_NAME: &str = r"(?:[\p{L}\p{N}_#@$.]|\[[^\]]*\]?)*";

static JOIN_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bjoin(?:\s+{TYPING_NAME})?$")).expect("join tail pattern")
});

static ON_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bon\s*$").expect("on tail pattern"));

/// `[schema.]table [[AS] alias]` followed by whitespace, and nothing else.
static TABLE_THEN_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\s+(?:{ANY_IDENT}\.)?{ANY_IDENT}(?:\s+(?:AS\s+)?{ANY_IDENT})?\s+$"
    ))
    .expect("table then space pattern")
});

static ORDER_BY_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:limit|offset|fetch|for|union|intersect|except)\b")
        .expect("order by terminator pattern")
});

static INSERT_COLUMN_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^insert\s+(?:into\s+)?(?:{ANY_IDENT}\.)?({ANY_IDENT})\s*\([^)]*$"
    ))
    .expect("insert column list pattern")
});

static INSERT_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^insert\s+(?:into\s+)?{TYPING_NAME}$")).expect("insert target pattern")
});

static UPDATE_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^update\s+{TYPING_NAME}$")).expect("update target pattern")
});

static CONDITION_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:and|or)\b").expect("condition split pattern"));

/// One operand (column, aggregate, literal or number) followed by whitespace.
static BARE_OPERAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\s*((?:{ANY_IDENT}\.)?{ANY_IDENT}|\w+\s*\([^()]*\)|'[^']*'|\d+(?:\.\d+)?)\s+$"
    ))
    .expect("bare operand pattern")
});

/// Words that look like an operand but start or finish a predicate.
const PREDICATE_WORDS: &[&str] = &[
    "not", "exists", "is", "null", "in", "like", "between", "case", "when", "then", "else",
    "end", "select",
];

/// Last position of every governing keyword in the statement.
#[derive(Debug, Clone, Copy)]
struct Landmarks {
    select: Option<usize>,
    from: Option<usize>,
    where_: Option<usize>,
    order_by: Option<usize>,
    group_by: Option<usize>,
    having: Option<usize>,
    insert: Option<usize>,
    update: Option<usize>,
    set: Option<usize>,
    values: Option<usize>,
    join: Option<usize>,
    on: Option<usize>,
}

impl Landmarks {
    fn locate(text: &str) -> Self {
        Self {
            select: Keyword::Select.last_in(text),
            from: Keyword::From.last_in(text),
            where_: Keyword::Where.last_in(text),
            order_by: Keyword::OrderBy.last_in(text),
            group_by: Keyword::GroupBy.last_in(text),
            having: Keyword::Having.last_in(text),
            insert: Keyword::Insert.last_in(text),
            update: Keyword::Update.last_in(text),
            set: Keyword::Set.last_in(text),
            values: Keyword::Values.last_in(text),
            join: Keyword::Join.last_in(text),
            on: Keyword::On.last_in(text),
        }
    }
}

/// `a` occurs, and later than `b` (or `b` does not occur).
fn after(a: Option<usize>, b: Option<usize>) -> bool {
    a.is_some() && a > b
}

/// Classify the clause under the cursor.
///
/// `text_before_cursor` is the document up to the cursor, `line_before_cursor`
/// the current line up to the cursor. Never fails; unknown shapes yield
/// [`Clause::Default`] with low confidence.
pub fn analyze_sql_context(text_before_cursor: &str, line_before_cursor: &str) -> SqlContext {
    let text = mask_comments(current_statement(text_before_cursor));
    let context = classify(&text, line_before_cursor);
    trace!(clause = %context.clause, confidence = %context.confidence, "Analyzed cursor context");
    context
}

fn classify(text: &str, line: &str) -> SqlContext {
    let at = Landmarks::locate(text);
    let end_of = |kw: Keyword| kw.last_end_in(text).unwrap_or(text.len());

    if JOIN_TAIL.is_match(line) {
        return SqlContext::high(Clause::JoinTable);
    }

    let on_is_current = after(at.on, at.join)
        && after(at.on, at.where_)
        && after(at.on, at.group_by)
        && after(at.on, at.order_by)
        && after(at.on, at.having);
    if ON_TAIL.is_match(line) || (at.join.is_some() && on_is_current) {
        return SqlContext::high(Clause::OnCondition);
    }

    if after(at.order_by, at.where_)
        && after(at.order_by, at.group_by)
        && after(at.order_by, at.having)
        && after(at.order_by, at.select)
        && !ORDER_BY_END.is_match(&text[end_of(Keyword::OrderBy)..])
    {
        return SqlContext::high(Clause::OrderBy);
    }

    if after(at.group_by, at.where_)
        && after(at.group_by, at.order_by)
        && after(at.group_by, at.select)
        && after(at.group_by, at.having)
    {
        return SqlContext::high(Clause::GroupBy);
    }

    if after(at.having, at.where_)
        && after(at.having, at.group_by)
        && after(at.having, at.select)
        && after(at.having, at.order_by)
    {
        let suggest_operators = suggests_operators(&text[end_of(Keyword::Having)..]);
        return SqlContext::high(Clause::Having { suggest_operators });
    }

    let column_list = at
        .insert
        .filter(|_| after(at.insert, at.select))
        .and_then(|insert| INSERT_COLUMN_LIST.captures(&text[insert..]));
    if let Some(caps) = column_list {
        let table_name = strip_brackets(&caps[1]).to_string();
        return SqlContext::high(Clause::InsertColumns { table_name });
    }

    if at.insert.is_some() && after(at.values, at.insert) && after(at.values, at.select) {
        return SqlContext::medium(Clause::InsertValues);
    }

    if at.update.is_some() && after(at.set, at.update) && after(at.set, at.where_) && after(at.set, at.from) {
        return SqlContext::high(Clause::UpdateSet);
    }

    if (after(at.where_, at.from) || after(at.where_, at.set)) && after(at.where_, at.select) {
        let suggest_operators = suggests_operators(&text[end_of(Keyword::Where)..]);
        return SqlContext::high(Clause::Where { suggest_operators });
    }

    if after(at.select, at.from) {
        return SqlContext::high(Clause::Select);
    }

    if after(at.from, at.select) {
        let mut target_start = end_of(Keyword::From);
        if after(at.join, at.from) {
            target_start = end_of(Keyword::Join);
        }
        if TABLE_THEN_SPACE.is_match(&text[target_start..]) {
            return SqlContext::medium(Clause::AfterFrom);
        }
        return SqlContext::high(Clause::From);
    }

    if (typing_target(text, at.update, &UPDATE_TARGET) && !after(at.set, at.update))
        || typing_target(text, at.insert, &INSERT_TARGET)
    {
        return SqlContext::medium(Clause::From);
    }

    SqlContext::default()
}

/// `UPDATE name` / `INSERT [INTO] name` with the name still being typed.
fn typing_target(text: &str, keyword: Option<usize>, pattern: &Regex) -> bool {
    keyword.is_some_and(|i| pattern.is_match(&text[i..]))
}

/// Whether the last condition of a WHERE/HAVING body is a lone operand
/// waiting for its operator.
pub fn suggests_operators(clause_body: &str) -> bool {
    let fragment = CONDITION_SPLIT.split(clause_body).last().unwrap_or(clause_body);
    BARE_OPERAND
        .captures(fragment)
        .is_some_and(|caps| !PREDICATE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(&caps[1])))
}
