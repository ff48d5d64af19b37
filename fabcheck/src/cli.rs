// fabcheck/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use fabcheck_core::domain::quality::Layer;

#[derive(Parser)]
#[command(name = "fabcheck")]
#[command(about = "Data quality rule engine for fab manufacturing datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔬 Runs the rule catalog against one or more data layers
    Check {
        /// Layer(s) to validate, in order
        #[arg(long, short, value_enum, default_values_t = vec![LayerArg::Raw])]
        layer: Vec<LayerArg>,

        /// Project directory (holds fabcheck.yaml)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Rules catalog (overrides fabcheck.yaml)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Root directory with one sub-directory per layer
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Write the markdown report
        #[arg(long, default_value = "false")]
        report: bool,

        /// Markdown report destination (implies --report)
        #[arg(long)]
        report_path: Option<PathBuf>,

        /// Write the JSON results to this file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Exit with code 1 when any rule fails or errors
        #[arg(long, default_value = "false")]
        strict: bool,
    },

    /// 📋 Validates the rules catalog and lists its rules
    Rules {
        /// Only rules applicable to this layer
        #[arg(long, short, value_enum)]
        layer: Option<LayerArg>,

        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayerArg {
    Raw,
    Staging,
    Curated,
}

impl From<LayerArg> for Layer {
    fn from(arg: LayerArg) -> Self {
        match arg {
            LayerArg::Raw => Layer::Raw,
            LayerArg::Staging => Layer::Staging,
            LayerArg::Curated => Layer::Curated,
        }
    }
}
