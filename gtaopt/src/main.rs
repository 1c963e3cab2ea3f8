use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gtaopt::{commands::CommandHandler, ctx::AppContext};

/// Inspect, tune and export GTA V settings.xml files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Config file path (default: .gtaopt.toml)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print settings grouped by section
    Show {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Print the flat model as JSON
    Dump {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Change settings and write the edited document
    Set {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
        /// Edits in PATH=VALUE form, e.g. graphics.MSAA=4
        #[arg(value_name = "PATH=VALUE", required = true)]
        assignments: Vec<String>,
        /// Output file (default from config)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Print the changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Write FILE with values taken from a flat model JSON
    Apply {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
        /// Flat model, as printed by `dump`
        #[arg(value_hint = clap::ValueHint::FilePath)]
        model: PathBuf,
        /// Output file (default from config)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
    /// Print the known settings, or with --config-schema the config file schema
    Schema {
        #[arg(long)]
        config_schema: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let ctx = AppContext::new(cli.config).await?;
    log::debug!("config: {:?}", ctx.config_path);

    match cli.command {
        Commands::Show { file } => CommandHandler::handle_show(&ctx, &file).await,
        Commands::Dump { file } => CommandHandler::handle_dump(&ctx, &file).await,
        Commands::Set {
            file,
            assignments,
            output,
            dry_run,
        } => CommandHandler::handle_set(&ctx, &file, &assignments, output, dry_run).await,
        Commands::Apply {
            file,
            model,
            output,
        } => CommandHandler::handle_apply(&ctx, &file, &model, output).await,
        Commands::Schema { config_schema } => CommandHandler::handle_schema(config_schema),
    }
}
