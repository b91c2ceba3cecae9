//! DryWet CLI
//!
//! Offline host for the DryWet effect.

use clap::Parser;
use env_logger::Env;
use log::info;

use drywet::cli::commands::{self, RenderOptions};
use drywet::cli::{Cli, Commands};
use drywet::engine::ExportFormat;
use drywet::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("DryWet v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("DryWet v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Render {
            input,
            output,
            params,
            pre_gain_db,
            mix,
            block_size,
            bit_depth,
        } => {
            let params = commands::resolve_params(params.as_deref(), pre_gain_db, mix)?;
            let summary = commands::render(&RenderOptions {
                input,
                output,
                params,
                block_size,
                format: ExportFormat::new(bit_depth),
            })?;
            commands::print_summary(&summary);
            Ok(())
        }
        Commands::Params => {
            println!("{}", commands::params_json()?);
            Ok(())
        }
    }
}
