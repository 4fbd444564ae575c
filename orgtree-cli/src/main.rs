#![forbid(unsafe_code)]

mod commands;

use clap::{Parser, Subcommand};
use orgtree_core::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::{handle_descendants, handle_interactive, handle_subordinates, handle_validate};

#[derive(Parser)]
#[command(name = "orgtree")]
#[command(about = "Subordinate lookup over a user/role hierarchy", version)]
struct Cli {
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Validate {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    Subordinates {
        user_id: i64,
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        no_write: bool,
    },
    Descendants {
        #[arg(required = true)]
        role_ids: Vec<i64>,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    Interactive {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = match cli.data_dir {
        Some(ref data_dir) => Config::default().with_data_dir(data_dir.clone()),
        None => Config::default(),
    };

    match cli.command {
        Commands::Validate { file } => handle_validate(&config, file)?,
        Commands::Subordinates {
            user_id,
            file,
            output,
            no_write,
        } => handle_subordinates(&config, user_id, file, output, no_write)?,
        Commands::Descendants { role_ids, file } => handle_descendants(&config, role_ids, file)?,
        Commands::Interactive { file } => handle_interactive(&config, file)?,
    }

    Ok(())
}
