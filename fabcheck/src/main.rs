// fabcheck/src/main.rs

mod cli;
mod commands;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use commands::check::{CheckArgs, CheckOutcome};
use fabcheck_core::FabcheckError;

fn main() {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug fabcheck check ... pour voir les détails
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        // --- USE CASE: RUN RULES ---
        Commands::Check {
            layer,
            project_dir,
            rules,
            data_dir,
            report,
            report_path,
            json,
            strict,
        } => commands::check::execute(CheckArgs {
            layers: layer.into_iter().map(Into::into).collect(),
            project_dir,
            rules,
            data_dir,
            report,
            report_path,
            json,
            strict,
        })
        .map(|outcome| outcome == CheckOutcome::StrictFailure),

        // --- USE CASE: LIST RULES ---
        Commands::Rules {
            layer,
            project_dir,
            rules,
        } => commands::rules::execute(project_dir, rules, layer.map(Into::into)).map(|_| false),
    };

    match result {
        Ok(false) => {}
        Ok(true) => {
            eprintln!("\n❌ FAILURE. Blocking data quality issues detected (--strict).");
            // Exit with error code for CI/CD
            std::process::exit(1);
        }
        Err(e) => {
            report_error(e);
            std::process::exit(1);
        }
    }
}

fn report_error(err: anyhow::Error) {
    match err.downcast::<FabcheckError>() {
        Ok(e) if e.is_config_error() => {
            eprintln!("\n💥 CONFIGURATION ERROR, no rule was executed.");
            eprintln!("{:?}", miette::Report::new(e));
        }
        Ok(e) => eprintln!("{:?}", miette::Report::new(e)),
        Err(other) => eprintln!("\n💥 ERROR: {:#}", other),
    }
}
