//! Text intelligence for SQL editors.
//!
//! Splits scripts into statements, validates FROM/JOIN targets against a
//! schema snapshot, classifies the clause under the cursor and resolves the
//! aliases and foreign-key relationships needed for completion. Every entry
//! point is a pure function over its arguments and never fails on malformed
//! SQL.
//!
//! ```rust
//! use sqlintel::*;
//!
//! let schema = DatabaseSchema::new()
//!     .with_table(TableInfo::new("dbo", "Users").with_column(ColumnInfo::new("Id", "int")));
//!
//! let markers = validate_sql("SELECT * FROM Users; SELECT * FROM Missing", &schema);
//! assert_eq!(markers.len(), 1);
//! assert_eq!(markers[0].message, "Invalid object name 'Missing'.");
//!
//! let context = analyze_sql_context("SELECT * FROM Users WHERE ", "WHERE ");
//! assert!(matches!(context.clause, Clause::Where { .. }));
//! ```

reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(logging);
reexport!(metadata);
reexport!(sql);
reexport!(logic);
reexport!(autocomplete);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
