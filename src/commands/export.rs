use anyhow::Result;
use tracing::info;

use crate::cli::ExportArgs;
use crate::db::open_read_only;
use crate::export::{ExportOptions, Selection, ensure_all_exported, run_export};

pub fn run(args: ExportArgs) -> Result<()> {
    let selection = selection_from_args(&args);
    let mut options = ExportOptions::new(&args.output_dir);
    options.exclude_frames = args.exclude_frames.clone();
    options.fail_fast = args.fail_fast;
    options.pretty = args.pretty;
    options.dry_run = args.dry_run;
    options.write_manifest = !args.no_manifest;

    info!(
        db_path = %args.db_path.display(),
        output_dir = %options.output_dir.display(),
        "export requested"
    );

    let connection = open_read_only(&args.db_path)?;
    let manifest = run_export(
        &connection,
        &args.db_path.display().to_string(),
        &selection,
        &options,
    )?;

    ensure_all_exported(&manifest)
}

fn selection_from_args(args: &ExportArgs) -> Selection {
    if let Some(frame_id) = args.frame {
        Selection::Frame(frame_id)
    } else if !args.lu_ids.is_empty() {
        Selection::Units(args.lu_ids.clone())
    } else {
        Selection::All
    }
}
