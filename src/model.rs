use serde::{Deserialize, Serialize};

use crate::codes::{AnnoStatus, LayerType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexUnitRow {
    pub definition: Option<String>,
    pub lemma_id: Option<i64>,
    pub frame_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnoSetRow {
    pub id: i64,
    pub sentence_id: i64,
    pub subcorpus_id: Option<i64>,
    pub status: AnnoStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcorpusRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRow {
    pub id: i64,
    pub layer_type: LayerType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRow {
    pub id: i64,
    pub label_type_id: i64,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub itype_code: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTypeTarget {
    pub table_name: Option<String>,
    pub row_id: i64,
}

/// One exported lexical unit, as consumed by the web application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexUnitDocument {
    pub definition: String,
    #[serde(rename = "frameID")]
    pub frame_id: i64,
    pub name: String,
    pub subcorpora: Vec<SubcorpusDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubcorpusDocument {
    pub name: String,
    pub sents: Vec<SentenceDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentenceDocument {
    #[serde(rename = "ID")]
    pub id: i64,
    pub text: String,
    pub anno_sets: Vec<AnnoSetDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnoSetDocument {
    pub status: AnnoStatus,
    #[serde(rename = "ID")]
    pub id: i64,
    pub layers: Vec<LayerDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayerDocument {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    pub labels: Vec<LabelDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelDocument {
    pub start: Option<i64>,
    pub end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub itype: Option<String>,
    pub name: String,
}

impl LexUnitDocument {
    pub fn sentence_count(&self) -> usize {
        self.subcorpora
            .iter()
            .map(|subcorpus| subcorpus.sents.len())
            .sum()
    }

    pub fn anno_set_count(&self) -> usize {
        self.subcorpora
            .iter()
            .flat_map(|subcorpus| subcorpus.sents.iter())
            .map(|sentence| sentence.anno_sets.len())
            .sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportCounts {
    pub selected: usize,
    pub exported: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitExportEntry {
    pub lu_id: i64,
    pub name: Option<String>,
    pub status: String,
    pub path: Option<String>,
    pub sha256: Option<String>,
    pub sentence_count: usize,
    pub anno_set_count: usize,
    pub error: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub finished_at: String,
    pub db_path: String,
    pub selection: String,
    pub fail_fast: bool,
    pub counts: ExportCounts,
    pub units: Vec<UnitExportEntry>,
}
