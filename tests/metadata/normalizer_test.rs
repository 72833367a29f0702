use std::sync::Once;

use dbscope::config::MetadataSettings;
use dbscope::dialect::{CatalogDialect, Dialect};
use dbscope::metadata::{CatalogError, MemoryCatalog, MetadataNormalizer};
use dbscope::model::{Database, IndexKind, RoutineKind, SortDirection};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

const D: Dialect = Dialect::MySql;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

fn normalizer(catalog: MemoryCatalog) -> MetadataNormalizer<MemoryCatalog> {
    init_tracing();
    MetadataNormalizer::new(catalog, D)
}

fn column_row(name: &str, data_type: &str, column_type: &str, position: i64) -> Value {
    json!({
        "TABLE_SCHEMA": "db1",
        "TABLE_NAME": "orders",
        "COLUMN_NAME": name,
        "ORDINAL_POSITION": position,
        "COLUMN_DEFAULT": null,
        "IS_NULLABLE": "NO",
        "DATA_TYPE": data_type,
        "COLUMN_TYPE": column_type,
        "NUMERIC_SCALE": null,
        "CHARACTER_SET_NAME": null,
        "COLLATION_NAME": null,
        "COLUMN_KEY": "",
        "EXTRA": "",
        "COLUMN_COMMENT": ""
    })
}

fn index_row(key: &str, column: &str, seq: i64, non_unique: i64) -> Value {
    json!({
        "Table": "orders",
        "Non_unique": non_unique,
        "Key_name": key,
        "Seq_in_index": seq,
        "Column_name": column,
        "Collation": "A",
        "Cardinality": 10,
        "Sub_part": null,
        "Index_type": "BTREE",
        "Index_comment": ""
    })
}

// =============================================================================
// Columns
// =============================================================================

#[test]
fn test_columns_map_types_sizes_and_flags() {
    let mut id = column_row("id", "int", "int(11) unsigned", 1);
    id["COLUMN_KEY"] = json!("PRI");
    id["EXTRA"] = json!("auto_increment");

    let mut price = column_row("price", "decimal", "decimal(10,2)", 2);
    price["NUMERIC_SCALE"] = json!(2);
    price["COLUMN_DEFAULT"] = json!("0.00");

    let mut title = column_row("title", "varchar", "varchar(255)", 3);
    title["IS_NULLABLE"] = json!("YES");
    title["CHARACTER_SET_NAME"] = json!("utf8mb4");
    title["COLLATION_NAME"] = json!("utf8mb4_0900_ai_ci");
    title["COLUMN_COMMENT"] = json!("display title");

    let status = column_row("status", "enum", "enum('a','b','c')", 4);
    let created = column_row("created_at", "datetime", "datetime", 5);

    let catalog = MemoryCatalog::new().with_rows(
        D.columns_sql("db1", "orders"),
        vec![id, price, title, status, created],
    );
    let columns = normalizer(catalog)
        .columns(&(), "db1", None, "orders")
        .unwrap();

    assert_eq!(columns.len(), 5);

    let id = &columns[0];
    assert_eq!(id.name, "id");
    assert_eq!(id.old_name, "id");
    assert_eq!(id.column_type, "INT");
    assert_eq!(id.column_size(), Some(11));
    assert!(id.primary_key);
    assert!(id.auto_increment);
    assert!(!id.nullable);
    assert_eq!(id.ordinal_position, 1);
    assert_eq!(id.database_name, "db1");
    assert_eq!(id.table_name, "orders");
    assert_eq!(id.schema_name, None);

    let price = &columns[1];
    assert_eq!(price.column_type, "DECIMAL");
    assert_eq!(price.column_size(), Some(10));
    assert_eq!(price.decimal_digits, Some(2));
    assert_eq!(price.default_value.as_deref(), Some("0.00"));
    assert!(!price.primary_key);
    assert!(!price.auto_increment);

    let title = &columns[2];
    assert_eq!(title.column_size(), Some(255));
    assert_eq!(title.decimal_digits, None);
    assert!(title.nullable);
    assert_eq!(title.char_set_name.as_deref(), Some("utf8mb4"));
    assert_eq!(title.collation_name.as_deref(), Some("utf8mb4_0900_ai_ci"));
    assert_eq!(title.comment.as_deref(), Some("display title"));

    let status = &columns[3];
    assert_eq!(status.column_type, "ENUM");
    assert_eq!(status.value(), Some("'a','b','c'"));
    assert_eq!(status.column_size(), None);

    let created = &columns[4];
    assert_eq!(created.column_size(), None);
    assert_eq!(created.decimal_digits, None);
}

#[test]
fn test_columns_malformed_type_keeps_row() {
    let mut odd = column_row("amount", "decimal", "decimal(12,x)", 1);
    odd["NUMERIC_SCALE"] = json!(4);

    let catalog = MemoryCatalog::new().with_rows(D.columns_sql("db1", "orders"), vec![odd]);
    let columns = normalizer(catalog)
        .columns(&(), "db1", None, "orders")
        .unwrap();

    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].column_size(), None);
    assert_eq!(columns[0].decimal_digits, Some(4));
}

#[test]
fn test_auto_increment_marker_is_substring_match() {
    let mut id = column_row("id", "bigint", "bigint", 1);
    id["EXTRA"] = json!("DEFAULT_GENERATED auto_increment");
    let mut other = column_row("ts", "timestamp", "timestamp", 2);
    other["EXTRA"] = json!("on update CURRENT_TIMESTAMP");

    let catalog = MemoryCatalog::new().with_rows(D.columns_sql("db1", "orders"), vec![id, other]);
    let columns = normalizer(catalog)
        .columns(&(), "db1", None, "orders")
        .unwrap();

    assert!(columns[0].auto_increment);
    assert!(!columns[1].auto_increment);
}

#[test]
fn test_columns_query_failure_propagates() {
    let catalog =
        MemoryCatalog::new().with_failure(D.columns_sql("db1", "orders"), "access denied");
    let err = normalizer(catalog)
        .columns(&(), "db1", None, "orders")
        .unwrap_err();

    assert!(err.is_data_access());
    assert!(matches!(err, CatalogError::QueryFailed { ref message, .. } if message == "access denied"));
}

#[test]
fn test_reads_are_idempotent() {
    let catalog = MemoryCatalog::new()
        .with_rows(
            D.columns_sql("db1", "orders"),
            vec![column_row("id", "int", "int(11)", 1)],
        )
        .with_rows(
            D.indexes_sql("db1", "orders"),
            vec![index_row("PRIMARY", "id", 1, 0)],
        );
    let normalizer = normalizer(catalog);

    let first = normalizer.columns(&(), "db1", None, "orders").unwrap();
    let second = normalizer.columns(&(), "db1", None, "orders").unwrap();
    assert_eq!(first, second);

    let first = normalizer.indexes(&(), "db1", None, "orders").unwrap();
    let second = normalizer.indexes(&(), "db1", None, "orders").unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Indexes
// =============================================================================

#[test]
fn test_indexes_first_seen_order_and_sorted_columns() {
    let rows = vec![
        index_row("PRIMARY", "id", 1, 0),
        index_row("idx_customer_date", "ordered_at", 2, 1),
        index_row("uk_ref", "ref", 1, 0),
        index_row("idx_customer_date", "customer_id", 1, 1),
    ];
    let catalog = MemoryCatalog::new().with_rows(D.indexes_sql("db1", "orders"), rows);
    let indexes = normalizer(catalog)
        .indexes(&(), "db1", None, "orders")
        .unwrap();

    let names: Vec<_> = indexes.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["PRIMARY", "idx_customer_date", "uk_ref"]);

    assert_eq!(indexes[0].kind, IndexKind::PrimaryKey);
    assert!(indexes[0].unique);
    assert_eq!(indexes[1].kind, IndexKind::Normal);
    assert!(!indexes[1].unique);
    assert_eq!(indexes[1].column_names(), ["customer_id", "ordered_at"]);
    assert_eq!(indexes[2].kind, IndexKind::Unique);

    let column = &indexes[1].columns[0];
    assert_eq!(column.ordinal_position, 1);
    assert_eq!(column.direction, SortDirection::Ascending);
    assert_eq!(column.cardinality, Some(10));
}

#[test]
fn test_indexes_classify_fulltext_and_spatial() {
    let mut ft = index_row("ft_body", "body", 1, 1);
    ft["Index_type"] = json!("FULLTEXT");
    ft["Collation"] = json!(null);
    let mut sp = index_row("sp_location", "location", 1, 1);
    sp["Index_type"] = json!("SPATIAL");
    sp["Sub_part"] = json!(32);

    let catalog = MemoryCatalog::new().with_rows(D.indexes_sql("db1", "orders"), vec![ft, sp]);
    let indexes = normalizer(catalog)
        .indexes(&(), "db1", None, "orders")
        .unwrap();

    assert_eq!(indexes[0].kind, IndexKind::Fulltext);
    assert_eq!(indexes[0].columns[0].direction, SortDirection::Unspecified);
    assert_eq!(indexes[1].kind, IndexKind::Spatial);
    assert!(indexes[1].columns[0].is_prefix());
}

#[test]
fn test_indexes_of_table_without_indexes() {
    let indexes = normalizer(MemoryCatalog::new())
        .indexes(&(), "db1", None, "heap")
        .unwrap();
    assert!(indexes.is_empty());
}

// =============================================================================
// Tables and views
// =============================================================================

#[test]
fn test_tables_mapping() {
    let catalog = MemoryCatalog::new().with_rows(
        D.tables_sql("db1", None),
        vec![json!({
            "TABLE_SCHEMA": "db1",
            "TABLE_NAME": "orders",
            "ENGINE": "InnoDB",
            "VERSION": 10,
            "TABLE_ROWS": 1200,
            "DATA_LENGTH": 65536,
            "AUTO_INCREMENT": 1201,
            "CREATE_TIME": "2024-03-01 10:00:00",
            "UPDATE_TIME": null,
            "TABLE_COLLATION": "utf8mb4_0900_ai_ci",
            "TABLE_COMMENT": "customer orders"
        })],
    );
    let tables = normalizer(catalog).tables(&(), "db1", None, None).unwrap();

    assert_eq!(tables.len(), 1);
    let table = &tables[0];
    assert_eq!(table.database_name, "db1");
    assert_eq!(table.name, "orders");
    assert_eq!(table.engine.as_deref(), Some("InnoDB"));
    assert_eq!(table.rows, Some(1200));
    assert_eq!(table.auto_increment, Some(1201));
    assert_eq!(table.update_time, None);
    assert_eq!(table.comment.as_deref(), Some("customer orders"));
    assert_eq!(table.ddl, None);
}

#[test]
fn test_tables_filter_uses_narrowed_statement() {
    let catalog = MemoryCatalog::new();
    let normalizer = normalizer(catalog);
    let tables = normalizer.tables(&(), "db1", None, Some("orders")).unwrap();

    assert!(tables.is_empty());
    assert_eq!(
        normalizer.provider().executed(),
        [D.tables_sql("db1", Some("orders"))]
    );
}

#[test]
fn test_table_ddl() {
    let catalog = MemoryCatalog::new().with_rows(
        D.table_ddl_sql("db1", "orders"),
        vec![json!({"Table": "orders", "Create Table": "CREATE TABLE `orders` (...)"})],
    );
    let normalizer = normalizer(catalog);

    assert_eq!(
        normalizer.table_ddl(&(), "db1", None, "orders").unwrap().as_deref(),
        Some("CREATE TABLE `orders` (...)")
    );
    assert_eq!(normalizer.table_ddl(&(), "db1", None, "missing").unwrap(), None);
}

#[test]
fn test_blank_object_name_never_reads_the_database_namesake() {
    let catalog = MemoryCatalog::new()
        .with_rows(
            "SHOW CREATE TABLE `shop`",
            vec![json!({"Table": "shop", "Create Table": "CREATE TABLE `shop` (id int)"})],
        )
        .with_rows(
            "SHOW CREATE VIEW `shop`",
            vec![json!({"View": "shop", "Create View": "CREATE VIEW `shop` AS select 1"})],
        )
        .with_rows(
            "SHOW CREATE FUNCTION `shop`",
            vec![json!({"Function": "shop", "Create Function": "CREATE FUNCTION `shop`() ..."})],
        );
    let normalizer = normalizer(catalog);

    assert_eq!(normalizer.table_ddl(&(), "shop", None, "").unwrap(), None);
    assert_eq!(normalizer.view(&(), "shop", None, " ").unwrap().ddl, None);
    assert_eq!(normalizer.function(&(), "shop", None, "").unwrap().body, None);

    let executed = normalizer.provider().executed();
    assert!(executed.contains(&"SHOW CREATE TABLE `shop`.``".to_string()));
    assert!(executed.contains(&"SHOW CREATE VIEW `shop`.` `".to_string()));
    assert!(executed.contains(&"SHOW CREATE FUNCTION `shop`.``".to_string()));
}

#[test]
fn test_view_found_and_missing() {
    let catalog = MemoryCatalog::new().with_rows(
        D.view_ddl_sql("db1", "v_totals"),
        vec![json!({"View": "v_totals", "Create View": "CREATE VIEW `v_totals` AS select 1"})],
    );
    let normalizer = normalizer(catalog);

    let view = normalizer.view(&(), "db1", None, "v_totals").unwrap();
    assert_eq!(view.name, "v_totals");
    assert_eq!(view.ddl.as_deref(), Some("CREATE VIEW `v_totals` AS select 1"));

    let missing = normalizer.view(&(), "db1", Some(""), "nope").unwrap();
    assert_eq!(missing.database_name, "db1");
    assert_eq!(missing.schema_name, None);
    assert_eq!(missing.name, "nope");
    assert_eq!(missing.ddl, None);
}

// =============================================================================
// Triggers
// =============================================================================

#[test]
fn test_missing_trigger_returns_shell() {
    let trigger = normalizer(MemoryCatalog::new())
        .trigger(&(), "db1", None, "ghost")
        .unwrap();

    assert_eq!(trigger.database_name, "db1");
    assert_eq!(trigger.name, "ghost");
    assert_eq!(trigger.event, None);
    assert_eq!(trigger.body, None);
}

#[test]
fn test_trigger_enriched_from_first_row() {
    let catalog = MemoryCatalog::new().with_rows(
        D.trigger_sql("db1", "trg_audit"),
        vec![json!({
            "TRIGGER_NAME": "trg_audit",
            "EVENT_MANIPULATION": "INSERT",
            "ACTION_STATEMENT": "BEGIN INSERT INTO audit VALUES (NEW.id); END"
        })],
    );
    let trigger = normalizer(catalog)
        .trigger(&(), "db1", None, "trg_audit")
        .unwrap();

    assert_eq!(trigger.event.as_deref(), Some("INSERT"));
    assert_eq!(
        trigger.body.as_deref(),
        Some("BEGIN INSERT INTO audit VALUES (NEW.id); END")
    );
}

#[test]
fn test_triggers_list_names_only() {
    let catalog = MemoryCatalog::new().with_rows(
        D.triggers_sql("db1"),
        vec![json!({"TRIGGER_NAME": "trg_a"}), json!({"TRIGGER_NAME": "trg_b"})],
    );
    let triggers = normalizer(catalog).triggers(&(), "db1", None).unwrap();

    let names: Vec<_> = triggers.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["trg_a", "trg_b"]);
    assert!(triggers.iter().all(|t| t.body.is_none()));
}

// =============================================================================
// Routines
// =============================================================================

#[test]
fn test_function_with_info_and_body() {
    let kind = RoutineKind::Function;
    let catalog = MemoryCatalog::new()
        .with_rows(
            D.routine_info_sql(kind, "db1", "fn_tax"),
            vec![json!({
                "SPECIFIC_NAME": "fn_tax",
                "ROUTINE_COMMENT": "sales tax",
                "ROUTINE_DEFINITION": "RETURN x * 0.2"
            })],
        )
        .with_rows(
            D.routine_ddl_sql(kind, "db1", "fn_tax"),
            vec![json!({
                "Function": "fn_tax",
                "Create Function": "CREATE FUNCTION `fn_tax`(x DECIMAL(10,2)) RETURNS DECIMAL(10,2) RETURN x * 0.2"
            })],
        );
    let function = normalizer(catalog)
        .function(&(), "db1", None, "fn_tax")
        .unwrap();

    assert_eq!(function.kind, RoutineKind::Function);
    assert_eq!(function.specific_name.as_deref(), Some("fn_tax"));
    assert_eq!(function.comment.as_deref(), Some("sales tax"));
    assert!(function.body.unwrap().starts_with("CREATE FUNCTION"));
}

#[test]
fn test_routine_body_failure_is_tolerated() {
    let kind = RoutineKind::Procedure;
    let catalog = MemoryCatalog::new()
        .with_rows(
            D.routine_info_sql(kind, "db1", "sp_close"),
            vec![json!({"SPECIFIC_NAME": "sp_close", "ROUTINE_COMMENT": "month end"})],
        )
        .with_failure(D.routine_ddl_sql(kind, "db1", "sp_close"), "no privilege");
    let procedure = normalizer(catalog)
        .procedure(&(), "db1", None, "sp_close")
        .unwrap();

    assert_eq!(procedure.name, "sp_close");
    assert_eq!(procedure.comment.as_deref(), Some("month end"));
    assert_eq!(procedure.body, None);
}

#[test]
fn test_routine_info_failure_propagates() {
    let kind = RoutineKind::Function;
    let catalog = MemoryCatalog::new()
        .with_failure(D.routine_info_sql(kind, "db1", "fn_x"), "lost connection");
    let err = normalizer(catalog)
        .function(&(), "db1", None, "fn_x")
        .unwrap_err();
    assert!(matches!(err, CatalogError::QueryFailed { .. }));
}

#[test]
fn test_missing_routine_runs_both_steps() {
    let normalizer = normalizer(MemoryCatalog::new());
    let function = normalizer.function(&(), "db1", None, "fn_none").unwrap();

    assert_eq!(function.name, "fn_none");
    assert_eq!(function.comment, None);
    assert_eq!(function.body, None);
    assert_eq!(
        normalizer.provider().executed(),
        [
            D.routine_info_sql(RoutineKind::Function, "db1", "fn_none"),
            D.routine_ddl_sql(RoutineKind::Function, "db1", "fn_none"),
        ]
    );
}

#[test]
fn test_procedures_list() {
    let catalog = MemoryCatalog::new().with_rows(
        D.routines_sql(RoutineKind::Procedure, "db1"),
        vec![
            json!({"Db": "db1", "Name": "sp_a", "Type": "PROCEDURE", "Comment": "first"}),
            json!({"Db": "db1", "Name": "sp_b", "Type": "PROCEDURE", "Comment": ""}),
        ],
    );
    let procedures = normalizer(catalog).procedures(&(), "db1", None).unwrap();

    assert_eq!(procedures.len(), 2);
    assert_eq!(procedures[0].name, "sp_a");
    assert_eq!(procedures[0].comment.as_deref(), Some("first"));
    assert!(procedures.iter().all(|p| p.kind == RoutineKind::Procedure));
    assert!(procedures.iter().all(|p| p.body.is_none()));
}

#[test]
fn test_functions_empty_database() {
    let functions = normalizer(MemoryCatalog::new())
        .functions(&(), "db1", None)
        .unwrap();
    assert!(functions.is_empty());
}

// =============================================================================
// Databases
// =============================================================================

fn database_names(databases: &[Database]) -> Vec<&str> {
    databases.iter().map(|d| d.name.as_str()).collect()
}

#[test]
fn test_databases_system_last() {
    let catalog =
        MemoryCatalog::new().with_databases(["mysql", "shop", "information_schema", "crm", "sys"]);
    let databases = normalizer(catalog).databases(&()).unwrap();

    assert_eq!(
        database_names(&databases),
        ["shop", "crm", "mysql", "information_schema", "sys"]
    );
    assert!(!databases[0].system);
    assert!(databases[2].system);
}

#[test]
fn test_databases_hidden_and_overridden() {
    let settings = MetadataSettings {
        hide_system_databases: true,
        system_databases: Some(vec!["audit".to_string()]),
    };
    let catalog = MemoryCatalog::new().with_databases(["audit", "shop", "mysql"]);
    let normalizer = normalizer(catalog).with_settings(&settings);

    assert_eq!(normalizer.system_databases(), ["audit"]);
    let databases = normalizer.databases(&()).unwrap();
    assert_eq!(database_names(&databases), ["shop", "mysql"]);
}

#[test]
fn test_databases_custom_sorter() {
    let catalog = MemoryCatalog::new().with_databases(["b", "a", "c"]);
    let normalizer = normalizer(catalog).with_sorter(
        |mut dbs: Vec<Database>, _: &[String], _: &()| {
            dbs.sort_by(|x, y| x.name.cmp(&y.name));
            dbs
        },
    );

    let databases = normalizer.databases(&()).unwrap();
    assert_eq!(database_names(&databases), ["a", "b", "c"]);
}

// =============================================================================
// Requests, capabilities, naming
// =============================================================================

#[test]
fn test_blank_database_is_rejected() {
    let normalizer = normalizer(MemoryCatalog::new());

    let err = normalizer.columns(&(), "  ", None, "orders").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(_)));
    assert!(!err.is_data_access());
    assert!(normalizer.provider().executed().is_empty());
}

#[test]
fn test_table_meta_is_static() {
    let normalizer = normalizer(MemoryCatalog::new());
    let a = normalizer.table_meta("db1", None, Some("orders"));
    let b = normalizer.table_meta("other", Some("x"), None);

    assert_eq!(a, b);
    assert_eq!(a.index_keyword(IndexKind::PrimaryKey), Some("PRIMARY KEY"));
    assert!(normalizer.provider().executed().is_empty());
}

#[test]
fn test_quote_identifiers_skips_blank_parts() {
    let normalizer = normalizer(MemoryCatalog::new());

    assert_eq!(normalizer.quote_identifiers(&["db1", "", "tbl1"]), "`db1`.`tbl1`");
    assert_eq!(normalizer.quote_identifiers(&["db1", " ", "tbl1"]), "`db1`.`tbl1`");
    assert_eq!(normalizer.quote_identifiers(&[]), "");
    assert_eq!(normalizer.dialect().name(), "mysql");
}
