mod cmd_columns;
mod cmd_config;
mod cmd_generate;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zhoubao", version, about = "Weekly report generator for Yuque table docs")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read or write the report configuration
    Config {
        #[command(subcommand)]
        cmd: cmd_config::ConfigCmd,
    },
    /// Fetch the table schema and list column and option ids
    Columns {
        /// Only show select/multiSelect columns (task-type candidates)
        #[arg(long)]
        select_only: bool,
    },
    /// Fetch the table and write the weekly report
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "周报.md")]
        out: String,
        /// Print the report to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let store = zhoubao_store::ConfigStore::open_default();

    match cli.cmd {
        Command::Config { cmd } => cmd_config::run(cmd, &store),
        Command::Columns { select_only } => cmd_columns::execute(&store, select_only),
        Command::Generate { out, stdout } => cmd_generate::execute(&store, &out, stdout),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("ZHOUBAO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
