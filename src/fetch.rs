use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::codes::{AnnoStatus, LayerType};
use crate::error::IntegrityError;
use crate::model::{AnnoSetRow, LabelRow, LabelTypeTarget, LayerRow, LexUnitRow, SubcorpusRow};

/// Tables a label type may point at for its display name.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ItemTable {
    FrameElement,
    MiscLabel,
    GenericLabel,
}

impl ItemTable {
    pub fn parse(raw: &str) -> Result<Self, IntegrityError> {
        let trimmed = raw.trim();
        [Self::FrameElement, Self::MiscLabel, Self::GenericLabel]
            .into_iter()
            .find(|table| table.table_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| IntegrityError::UnknownItemTable(raw.to_string()))
    }

    pub fn table_name(self) -> &'static str {
        match self {
            Self::FrameElement => "FrameElement",
            Self::MiscLabel => "MiscLabel",
            Self::GenericLabel => "GenericLabel",
        }
    }
}

/// Read-only queries against the annotation database.
pub struct Fetcher<'conn> {
    connection: &'conn Connection,
}

impl<'conn> Fetcher<'conn> {
    pub fn new(connection: &'conn Connection) -> Self {
        Self { connection }
    }

    pub fn all_lex_unit_ids(&self) -> Result<Vec<i64>> {
        let mut statement = self
            .connection
            .prepare("SELECT ID FROM LexUnit ORDER BY ID")?;
        let rows = statement.query_map([], |row| row.get::<_, i64>(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("failed to list lexical units")
    }

    pub fn lex_unit_ids_for_frame(&self, frame_id: i64) -> Result<Vec<i64>> {
        let mut statement = self
            .connection
            .prepare("SELECT ID FROM LexUnit WHERE Frame_Ref = ?1 ORDER BY ID")?;
        let rows = statement.query_map([frame_id], |row| row.get::<_, i64>(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("failed to list lexical units of frame {frame_id}"))
    }

    pub fn frame_of_lex_unit(&self, lu_id: i64) -> Result<Option<i64>> {
        self.connection
            .query_row(
                "SELECT Frame_Ref FROM LexUnit WHERE ID = ?1",
                [lu_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .with_context(|| format!("failed to look up frame of lexical unit {lu_id}"))
    }

    pub fn manual_anno_sets(&self, lu_id: i64) -> Result<Vec<AnnoSetRow>> {
        self.anno_sets_where("LexUnit_Ref", lu_id, AnnoStatus::Manual)
            .with_context(|| format!("failed to fetch manual annotation sets of lexical unit {lu_id}"))
    }

    /// Fails when the sentence has no unannotated set; every exported
    /// sentence must carry its tagger output.
    pub fn unannotated_anno_sets(&self, sentence_id: i64) -> Result<Vec<AnnoSetRow>> {
        let rows = self
            .anno_sets_where("Sentence_Ref", sentence_id, AnnoStatus::Unannotated)
            .with_context(|| {
                format!("failed to fetch unannotated annotation sets of sentence {sentence_id}")
            })?;

        if rows.is_empty() {
            return Err(IntegrityError::MissingUnannotatedSet { sentence_id }.into());
        }

        Ok(rows)
    }

    fn anno_sets_where(
        &self,
        column: &'static str,
        value: i64,
        status: AnnoStatus,
    ) -> Result<Vec<AnnoSetRow>> {
        let sql = format!(
            "SELECT ID, Sentence_Ref, SubCorpus_Ref, CurrentAnnoStatus_Ref
             FROM AnnotationSet
             WHERE {column} = ?1 AND CurrentAnnoStatus_Ref = ?2
             ORDER BY ID"
        );
        let mut statement = self.connection.prepare(&sql)?;
        let rows = statement.query_map(params![value, status.code()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Option<i64>>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?;

        let mut anno_sets = Vec::new();
        for row in rows {
            let (id, sentence_id, subcorpus_id, status_code) = row?;
            anno_sets.push(AnnoSetRow {
                id,
                sentence_id,
                subcorpus_id,
                status: AnnoStatus::try_from(status_code)?,
            });
        }

        Ok(anno_sets)
    }

    pub fn subcorpora(&self, lu_id: i64) -> Result<Vec<SubcorpusRow>> {
        let mut statement = self
            .connection
            .prepare("SELECT ID, Name FROM SubCorpus WHERE LexUnit_Ref = ?1 ORDER BY ID")?;
        let rows = statement.query_map([lu_id], |row| {
            Ok(SubcorpusRow {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("failed to fetch subcorpora of lexical unit {lu_id}"))
    }

    pub fn sentence_text(&self, sentence_id: i64) -> Result<String> {
        let text = self
            .connection
            .query_row(
                "SELECT Text FROM Sentence WHERE ID = ?1",
                [sentence_id],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("failed to fetch text of sentence {sentence_id}"))?;

        Ok(text.ok_or(IntegrityError::MissingRow {
            entity: "sentence",
            id: sentence_id,
        })?)
    }

    pub fn lex_unit(&self, lu_id: i64) -> Result<LexUnitRow> {
        let row = self
            .connection
            .query_row(
                "SELECT SenseDesc, Lemma_Ref, Frame_Ref, Name FROM LexUnit WHERE ID = ?1",
                [lu_id],
                |row| {
                    Ok(LexUnitRow {
                        definition: row.get(0)?,
                        lemma_id: row.get(1)?,
                        frame_id: row.get(2)?,
                        name: row.get(3)?,
                    })
                },
            )
            .optional()
            .with_context(|| format!("failed to fetch lexical unit {lu_id}"))?;

        Ok(row.ok_or(IntegrityError::MissingRow {
            entity: "lexical unit",
            id: lu_id,
        })?)
    }

    /// Layers of an annotation set, restricted to the types its status exports.
    pub fn layers(&self, anno_set_id: i64, status: AnnoStatus) -> Result<Vec<LayerRow>> {
        let allowed = status.allowed_layer_types();
        let placeholders = (0..allowed.len())
            .map(|idx| format!("?{}", idx + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT ID, LayerType_Ref FROM Layer
             WHERE AnnotationSet_Ref = ?1 AND LayerType_Ref IN ({placeholders})
             ORDER BY ID"
        );

        let values = std::iter::once(anno_set_id).chain(allowed.iter().map(|layer| layer.code()));
        let mut statement = self.connection.prepare(&sql)?;
        let rows = statement.query_map(params_from_iter(values), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut layers = Vec::new();
        for row in rows {
            let (id, type_code) = row.with_context(|| {
                format!("failed to fetch layers of annotation set {anno_set_id}")
            })?;
            layers.push(LayerRow {
                id,
                layer_type: LayerType::try_from(type_code)?,
            });
        }

        Ok(layers)
    }

    pub fn labels(&self, layer_id: i64) -> Result<Vec<LabelRow>> {
        let mut statement = self.connection.prepare(
            "SELECT ID, LabelType_Ref, StartChar, EndChar, InstantiationType_Ref
             FROM Label WHERE Layer_Ref = ?1 ORDER BY ID",
        )?;
        let rows = statement.query_map([layer_id], |row| {
            Ok(LabelRow {
                id: row.get(0)?,
                label_type_id: row.get(1)?,
                start: row.get(2)?,
                end: row.get(3)?,
                itype_code: row.get(4)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("failed to fetch labels of layer {layer_id}"))
    }

    pub fn label_type_target(&self, label_type_id: i64) -> Result<LabelTypeTarget> {
        let target = self
            .connection
            .query_row(
                "SELECT DBTableName, DBTableID FROM LabelType WHERE ID = ?1",
                [label_type_id],
                |row| {
                    Ok(LabelTypeTarget {
                        table_name: row.get(0)?,
                        row_id: row.get(1)?,
                    })
                },
            )
            .optional()
            .with_context(|| format!("failed to fetch label type {label_type_id}"))?;

        Ok(target.ok_or(IntegrityError::MissingRow {
            entity: "label type",
            id: label_type_id,
        })?)
    }

    pub fn item_name(&self, table: ItemTable, row_id: i64) -> Result<String> {
        let sql = format!("SELECT Name FROM {} WHERE ID = ?1", table.table_name());
        let name = self
            .connection
            .query_row(&sql, [row_id], |row| row.get::<_, String>(0))
            .optional()
            .with_context(|| {
                format!("failed to fetch name of {} {row_id}", table.table_name())
            })?;

        Ok(name.ok_or(IntegrityError::MissingRow {
            entity: table.table_name(),
            id: row_id,
        })?)
    }

    /// Resolves a label type to the display name of the item it labels.
    pub fn label_type_name(&self, label_type_id: i64) -> Result<String> {
        let target = self.label_type_target(label_type_id)?;
        let raw_table = target
            .table_name
            .ok_or(IntegrityError::MissingItemTable { label_type_id })?;
        let table = ItemTable::parse(&raw_table)?;
        self.item_name(table, target.row_id)
    }
}
