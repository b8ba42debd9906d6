use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use crate::cli::StatusArgs;
use crate::codes::AnnoStatus;
use crate::db::{open_read_only, query_count};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSummary {
    pub lex_units: i64,
    pub frames_with_units: i64,
    pub sentences: i64,
    pub manual_sets: i64,
    pub unannotated_sets: i64,
}

pub fn run(args: StatusArgs) -> Result<()> {
    info!(db_path = %args.db_path.display(), "status requested");

    let connection = open_read_only(&args.db_path)?;
    let summary = summarize(&connection)?;

    info!(
        lex_units = summary.lex_units,
        frames = summary.frames_with_units,
        sentences = summary.sentences,
        manual_sets = summary.manual_sets,
        unannotated_sets = summary.unannotated_sets,
        "database status"
    );

    Ok(())
}

pub fn summarize(connection: &Connection) -> Result<DatabaseSummary> {
    Ok(DatabaseSummary {
        lex_units: query_count(connection, "SELECT COUNT(*) FROM LexUnit")?,
        frames_with_units: query_count(
            connection,
            "SELECT COUNT(DISTINCT Frame_Ref) FROM LexUnit",
        )?,
        sentences: query_count(connection, "SELECT COUNT(*) FROM Sentence")?,
        manual_sets: count_anno_sets(connection, AnnoStatus::Manual)?,
        unannotated_sets: count_anno_sets(connection, AnnoStatus::Unannotated)?,
    })
}

fn count_anno_sets(connection: &Connection, status: AnnoStatus) -> Result<i64> {
    let count = connection.query_row(
        "SELECT COUNT(*) FROM AnnotationSet WHERE CurrentAnnoStatus_Ref = ?1",
        [status.code()],
        |row| row.get(0),
    )?;
    Ok(count)
}
