use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "fnanno",
    version,
    about = "Export FrameNet annotation data as per-lexical-unit JSON documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Export(ExportArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(long)]
    pub db_path: PathBuf,

    #[arg(long, default_value = "anno-data")]
    pub output_dir: PathBuf,

    /// Only export lexical units belonging to this frame.
    #[arg(long, conflicts_with = "lu_ids")]
    pub frame: Option<i64>,

    /// Export exactly these lexical units.
    #[arg(long = "lu")]
    pub lu_ids: Vec<i64>,

    #[arg(long = "exclude-frame")]
    pub exclude_frames: Vec<i64>,

    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    pub no_manifest: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long)]
    pub db_path: PathBuf,
}
