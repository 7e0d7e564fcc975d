use crate::demo::{run_calculate, run_demo, CalculateArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand, ValueEnum};
use saw_engine::config::ServerConfig;
use saw_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SAW Housing Advisor",
    about = "Rank housing alternatives with Simple Additive Weighting from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the alternatives in a JSON calculation request
    Calculate(CalculateArgs),
    /// Rank the bundled sample housing dataset
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

impl ServeArgs {
    /// Command-line flags take precedence over the environment.
    pub(crate) fn apply(self, server: &mut ServerConfig) {
        if let Some(host) = self.host {
            server.host = host;
        }
        if let Some(port) = self.port {
            server.port = port;
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    /// Human readable ranking table
    #[default]
    Table,
    /// Raw result JSON
    Json,
    /// Ranking export as CSV
    Csv,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => run_calculate(args),
        Command::Demo(args) => run_demo(args),
    }
}
