use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use rusqlite::Connection;
use tracing::{error, info, warn};

use crate::assemble::assemble_lex_unit;
use crate::fetch::Fetcher;
use crate::model::{ExportCounts, ExportRunManifest, UnitExportEntry};
use crate::util::{
    now_utc_string, sha256_hex, to_json_bytes, utc_compact_string, write_bytes, write_json_pretty,
};

pub const MANIFEST_FILENAME: &str = "export_manifest.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Frame(i64),
    Units(Vec<i64>),
}

impl Selection {
    pub fn describe(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Frame(frame_id) => format!("frame:{frame_id}"),
            Self::Units(ids) => format!(
                "units:{}",
                ids.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub exclude_frames: Vec<i64>,
    pub fail_fast: bool,
    pub pretty: bool,
    pub dry_run: bool,
    pub write_manifest: bool,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            exclude_frames: Vec::new(),
            fail_fast: false,
            pretty: false,
            dry_run: false,
            write_manifest: true,
        }
    }

    pub fn document_path(&self, lu_id: i64) -> PathBuf {
        self.output_dir.join(format!("{lu_id}.json"))
    }
}

/// Resolves the lexical unit IDs to export, in ascending ID order for the
/// database-driven modes and in the given order for explicit lists.
pub fn select_lex_units(
    fetcher: &Fetcher<'_>,
    selection: &Selection,
    exclude_frames: &[i64],
) -> Result<Vec<i64>> {
    let candidates = match selection {
        Selection::All => fetcher.all_lex_unit_ids()?,
        Selection::Frame(frame_id) => {
            if exclude_frames.contains(frame_id) {
                warn!(frame_id, "requested frame is excluded; nothing to export");
                return Ok(Vec::new());
            }
            return fetcher.lex_unit_ids_for_frame(*frame_id);
        }
        Selection::Units(ids) => ids.clone(),
    };

    if exclude_frames.is_empty() {
        return Ok(candidates);
    }

    let mut selected = Vec::with_capacity(candidates.len());
    for lu_id in candidates {
        match fetcher.frame_of_lex_unit(lu_id)? {
            Some(frame_id) if exclude_frames.contains(&frame_id) => continue,
            _ => selected.push(lu_id),
        }
    }

    Ok(selected)
}

struct WrittenUnit {
    name: String,
    path: Option<PathBuf>,
    sha256: String,
    sentence_count: usize,
    anno_set_count: usize,
}

fn export_lex_unit(
    fetcher: &Fetcher<'_>,
    lu_id: i64,
    options: &ExportOptions,
) -> Result<WrittenUnit> {
    let document = assemble_lex_unit(fetcher, lu_id)
        .with_context(|| format!("failed to assemble lexical unit {lu_id}"))?;
    let data = to_json_bytes(&document, options.pretty)
        .with_context(|| format!("failed to serialize lexical unit {lu_id}"))?;

    let path = if options.dry_run {
        None
    } else {
        let path = options.document_path(lu_id);
        write_bytes(&path, &data)
            .with_context(|| format!("failed to write lexical unit {lu_id}"))?;
        Some(path)
    };

    Ok(WrittenUnit {
        sha256: sha256_hex(&data),
        sentence_count: document.sentence_count(),
        anno_set_count: document.anno_set_count(),
        name: document.name,
        path,
    })
}

/// Exports every selected lexical unit and returns the run manifest.
///
/// A failing unit is logged and recorded, and the batch moves on, unless
/// `fail_fast` is set, in which case the batch stops at the first failure and
/// that error is returned once the manifest for the units seen so far is
/// written.
pub fn run_export(
    connection: &Connection,
    db_label: &str,
    selection: &Selection,
    options: &ExportOptions,
) -> Result<ExportRunManifest> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("export-{}", utc_compact_string(started_ts));
    let fetcher = Fetcher::new(connection);

    let lu_ids = select_lex_units(&fetcher, selection, &options.exclude_frames)?;
    info!(
        run_id = %run_id,
        selection = %selection.describe(),
        units = lu_ids.len(),
        dry_run = options.dry_run,
        "starting export"
    );

    let mut units = Vec::with_capacity(lu_ids.len());
    let mut exported = 0;
    let mut failed = 0;
    let mut aborted: Option<anyhow::Error> = None;

    for &lu_id in &lu_ids {
        match export_lex_unit(&fetcher, lu_id, options) {
            Ok(written) => {
                exported += 1;
                info!(
                    lu_id,
                    name = %written.name,
                    sentences = written.sentence_count,
                    "exported lexical unit"
                );
                units.push(UnitExportEntry {
                    lu_id,
                    name: Some(written.name),
                    status: "exported".to_string(),
                    path: written.path.map(|path| path.display().to_string()),
                    sha256: Some(written.sha256),
                    sentence_count: written.sentence_count,
                    anno_set_count: written.anno_set_count,
                    error: None,
                });
            }
            Err(err) => {
                failed += 1;
                error!(lu_id, error = %format!("{err:#}"), "failed to export lexical unit");
                units.push(UnitExportEntry {
                    lu_id,
                    name: None,
                    status: "failed".to_string(),
                    path: None,
                    sha256: None,
                    sentence_count: 0,
                    anno_set_count: 0,
                    error: Some(err.chain().map(ToString::to_string).collect()),
                });

                if options.fail_fast {
                    aborted = Some(err.context(format!("export aborted at lexical unit {lu_id}")));
                    break;
                }
            }
        }
    }

    let manifest = ExportRunManifest {
        manifest_version: 1,
        run_id,
        started_at,
        finished_at: now_utc_string(),
        db_path: db_label.to_string(),
        selection: selection.describe(),
        fail_fast: options.fail_fast,
        counts: ExportCounts {
            selected: lu_ids.len(),
            exported,
            failed,
        },
        units,
    };

    if options.write_manifest && !options.dry_run {
        let manifest_path = options.output_dir.join(MANIFEST_FILENAME);
        write_json_pretty(&manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote export manifest");
    }

    if let Some(err) = aborted {
        return Err(err);
    }

    info!(
        exported = manifest.counts.exported,
        failed = manifest.counts.failed,
        "export completed"
    );

    Ok(manifest)
}

/// Turns recorded per-unit failures into a single summary error.
pub fn ensure_all_exported(manifest: &ExportRunManifest) -> Result<()> {
    if manifest.counts.failed == 0 {
        return Ok(());
    }

    let failed_ids = manifest
        .units
        .iter()
        .filter(|unit| unit.status == "failed")
        .map(|unit| unit.lu_id.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    bail!(
        "{} of {} lexical units failed to export: {failed_ids}",
        manifest.counts.failed,
        manifest.counts.selected
    );
}
