use std::path::Path;

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OpenFlags};

pub const REQUIRED_TABLES: [&str; 7] = [
    "LexUnit",
    "SubCorpus",
    "Sentence",
    "AnnotationSet",
    "Layer",
    "Label",
    "LabelType",
];

/// Opens the annotation database for reading. The connection is closed when
/// the returned handle is dropped.
pub fn open_read_only(db_path: &Path) -> Result<Connection> {
    if !db_path.exists() {
        bail!("database file missing: {}", db_path.display());
    }

    let connection = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open database read-only: {}", db_path.display()))?;

    verify_schema(&connection)
        .with_context(|| format!("unexpected schema in {}", db_path.display()))?;

    Ok(connection)
}

pub fn verify_schema(connection: &Connection) -> Result<()> {
    let mut statement = connection.prepare(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
    )?;

    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        let count: i64 = statement.query_row([table], |row| row.get(0))?;
        if count == 0 {
            missing.push(table);
        }
    }

    if !missing.is_empty() {
        bail!("missing required tables: {}", missing.join(", "));
    }

    Ok(())
}

pub fn query_count(connection: &Connection, sql: &str) -> Result<i64> {
    let count = connection.query_row(sql, [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{scratch_dir, seed_connection, seed_database_file};

    #[test]
    fn open_read_only_accepts_seeded_database() {
        let dir = scratch_dir("db-open");
        let db_path = dir.join("fn.sqlite");
        seed_database_file(&db_path);

        let connection = open_read_only(&db_path).expect("seeded DB should open");
        assert_eq!(
            query_count(&connection, "SELECT COUNT(*) FROM LexUnit").unwrap(),
            2
        );
        assert!(
            connection
                .execute("DELETE FROM LexUnit", [])
                .is_err(),
            "connection must be read-only"
        );
    }

    #[test]
    fn open_read_only_reports_missing_file() {
        let dir = scratch_dir("db-missing");
        let err = open_read_only(&dir.join("absent.sqlite")).expect_err("file does not exist");
        assert!(err.to_string().contains("database file missing"));
    }

    #[test]
    fn verify_schema_lists_missing_tables() {
        let connection = seed_connection();
        connection
            .execute_batch("DROP TABLE Label; DROP TABLE LabelType;")
            .expect("tables should drop");

        let err = verify_schema(&connection).expect_err("schema is incomplete");
        assert_eq!(err.to_string(), "missing required tables: Label, LabelType");
    }
}
