#![cfg(test)]
use crate::*;
pub use rstest::*;

/// Routes `tracing` output through the test harness once per process.
/// `RUST_LOG` picks what is shown.
pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A small shop database: users place orders of products, across two schemas.
#[fixture]
pub fn sample_schema() -> DatabaseSchema {
    common_init();
    let id = || ColumnInfo::new("Id", "int").primary_key();
    DatabaseSchema::new()
        .with_table(TableInfo::new("dbo", "Users").with_columns([
            id(),
            ColumnInfo::new("Name", "nvarchar").with_length(100),
            ColumnInfo::new("Email", "nvarchar").with_length(-1),
        ]))
        .with_table(TableInfo::new("dbo", "Orders").with_columns([
            id(),
            ColumnInfo::new("UserId", "int").nullable(false).foreign_key(),
            ColumnInfo::new("Total", "decimal").with_precision(10, 2),
        ]))
        .with_table(TableInfo::new("dbo", "OrderItems").with_columns([
            id(),
            ColumnInfo::new("OrderId", "int").foreign_key(),
            ColumnInfo::new("ProductId", "int").foreign_key(),
            ColumnInfo::new("Quantity", "int"),
        ]))
        .with_table(TableInfo::new("sales", "Products").with_columns([
            id(),
            ColumnInfo::new("Name", "nvarchar").with_length(200),
        ]))
        .with_table(TableInfo::new("dbo", "Order Details").with_column(id()))
        .with_view(TableInfo::new("dbo", "ActiveUsers").with_columns([
            ColumnInfo::new("Id", "int"),
            ColumnInfo::new("Name", "nvarchar").with_length(100),
        ]))
        .with_function(RoutineInfo::new("dbo", "fnRecentOrders"))
        .with_foreign_key(
            ForeignKeyInfo::new(("dbo", "Orders", "UserId"), ("dbo", "Users", "Id"))
                .named("FK_Orders_Users"),
        )
        .with_foreign_key(ForeignKeyInfo::new(
            ("dbo", "OrderItems", "OrderId"),
            ("dbo", "Orders", "Id"),
        ))
        .with_foreign_key(ForeignKeyInfo::new(
            ("dbo", "OrderItems", "ProductId"),
            ("sales", "Products", "Id"),
        ))
}

mod fixture_tests {
    use super::*;

    #[rstest]
    fn sample_schema_is_consistent(sample_schema: DatabaseSchema) {
        assert!(!sample_schema.is_empty());
        for fk in &sample_schema.foreign_keys {
            let from = sample_schema.find_table(Some(&fk.from_schema), &fk.from_table);
            let to = sample_schema.find_table(Some(&fk.to_schema), &fk.to_table);
            assert!(from.and_then(|t| t.column(&fk.from_column)).is_some(), "{fk}");
            assert!(to.and_then(|t| t.column(&fk.to_column)).is_some(), "{fk}");
        }
    }
}
