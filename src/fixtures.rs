use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::IntegrityError;

const SCHEMA_SQL: &str = "
    CREATE TABLE LexUnit (
      ID INTEGER PRIMARY KEY,
      Name TEXT NOT NULL,
      SenseDesc TEXT,
      Lemma_Ref INTEGER,
      Frame_Ref INTEGER NOT NULL
    );
    CREATE TABLE SubCorpus (
      ID INTEGER PRIMARY KEY,
      Name TEXT NOT NULL,
      LexUnit_Ref INTEGER NOT NULL
    );
    CREATE TABLE Sentence (
      ID INTEGER PRIMARY KEY,
      Text TEXT NOT NULL
    );
    CREATE TABLE AnnotationSet (
      ID INTEGER PRIMARY KEY,
      LexUnit_Ref INTEGER,
      Sentence_Ref INTEGER NOT NULL,
      SubCorpus_Ref INTEGER,
      CurrentAnnoStatus_Ref INTEGER NOT NULL
    );
    CREATE TABLE Layer (
      ID INTEGER PRIMARY KEY,
      AnnotationSet_Ref INTEGER NOT NULL,
      LayerType_Ref INTEGER NOT NULL
    );
    CREATE TABLE Label (
      ID INTEGER PRIMARY KEY,
      Layer_Ref INTEGER NOT NULL,
      LabelType_Ref INTEGER NOT NULL,
      StartChar INTEGER,
      EndChar INTEGER,
      InstantiationType_Ref INTEGER
    );
    CREATE TABLE LabelType (
      ID INTEGER PRIMARY KEY,
      DBTableName TEXT,
      DBTableID INTEGER NOT NULL
    );
    CREATE TABLE FrameElement (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL);
    CREATE TABLE MiscLabel (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL);
    CREATE TABLE GenericLabel (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL);
";

/// Frame 7 owns lexical units 1 (one annotated sentence) and 2 (nothing
/// annotated). Sentence 100 carries manual set 10 and unannotated set 11.
const SEED_SQL: &str = "
    INSERT INTO LexUnit (ID, Name, SenseDesc, Lemma_Ref, Frame_Ref) VALUES
      (1, 'cat.n', 'a small domesticated feline', 40, 7),
      (2, 'kitten.n', NULL, 41, 7);
    INSERT INTO SubCorpus (ID, Name, LexUnit_Ref) VALUES (20, 'S1', 1);
    INSERT INTO Sentence (ID, Text) VALUES (100, 'The cat sat.');
    INSERT INTO AnnotationSet (ID, LexUnit_Ref, Sentence_Ref, SubCorpus_Ref, CurrentAnnoStatus_Ref) VALUES
      (10, 1, 100, 20, 2),
      (11, 1, 100, 20, 1);
    INSERT INTO Layer (ID, AnnotationSet_Ref, LayerType_Ref) VALUES
      (300, 10, 1),
      (301, 11, 12);
    INSERT INTO Label (ID, Layer_Ref, LabelType_Ref, StartChar, EndChar, InstantiationType_Ref) VALUES
      (400, 300, 500, 0, 3, 1),
      (401, 301, 501, 0, 3, NULL);
    INSERT INTO LabelType (ID, DBTableName, DBTableID) VALUES
      (500, 'FrameElement', 600),
      (501, 'MiscLabel', 700);
    INSERT INTO FrameElement (ID, Name) VALUES (600, 'Cat');
    INSERT INTO MiscLabel (ID, Name) VALUES (700, 'DT');
";

/// Lexical unit 3 (frame 8) has a manually annotated sentence that lacks
/// its unannotated set.
const BROKEN_UNIT_SQL: &str = "
    INSERT INTO LexUnit (ID, Name, SenseDesc, Lemma_Ref, Frame_Ref) VALUES
      (3, 'dog.n', 'a domesticated canine', 42, 8);
    INSERT INTO SubCorpus (ID, Name, LexUnit_Ref) VALUES (21, 'S2', 3);
    INSERT INTO Sentence (ID, Text) VALUES (101, 'A dog barked.');
    INSERT INTO AnnotationSet (ID, LexUnit_Ref, Sentence_Ref, SubCorpus_Ref, CurrentAnnoStatus_Ref) VALUES
      (12, 3, 101, 21, 2);
";

pub fn seed(connection: &Connection) {
    connection
        .execute_batch(SCHEMA_SQL)
        .expect("fixture schema should apply");
    connection
        .execute_batch(SEED_SQL)
        .expect("fixture rows should insert");
}

pub fn seed_broken_unit(connection: &Connection) {
    connection
        .execute_batch(BROKEN_UNIT_SQL)
        .expect("broken unit rows should insert");
}

pub fn seed_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("in-memory DB should open");
    seed(&connection);
    connection
}

pub fn seed_database_file(path: &Path) {
    let connection = Connection::open(path).expect("fixture DB file should open");
    seed(&connection);
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fnanno-{}-{name}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("stale scratch dir should be removable");
    }
    std::fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}

pub fn error_is(err: &anyhow::Error, expected: &IntegrityError) -> bool {
    err.chain()
        .any(|cause| cause.downcast_ref::<IntegrityError>() == Some(expected))
}
