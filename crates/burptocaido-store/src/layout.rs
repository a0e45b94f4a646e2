// On-disk layout of a Caido project directory

/// Primary database holding request/response metadata.
pub const PRIMARY_DB_FILE: &str = "database.caido";

/// Secondary database holding raw request/response bytes.
pub const RAW_DB_FILE: &str = "database_raw.caido";

/// Schema name the raw database is attached under.
pub const RAW_ALIAS: &str = "raw";

/// Tables written by a migration, as `(schema, table)`.
pub const REQUIRED_TABLES: [(&str, &str); 6] = [
    ("main", "responses"),
    ("main", "requests"),
    ("main", "requests_metadata"),
    ("main", "intercept_entries"),
    (RAW_ALIAS, "responses_raw"),
    (RAW_ALIAS, "requests_raw"),
];
