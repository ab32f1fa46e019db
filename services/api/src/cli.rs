use crate::report::{run_categories, run_rank, CategoriesArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use maintenance_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Maintenance Advisor",
    about = "Rank service packages for a maintenance-severity category",
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
    /// Rank the packages of one category and print the decision report
    Rank(RankArgs),
    /// List configured categories and their package counts
    Categories(CategoriesArgs),
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

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Categories(args) => run_categories(args),
    }
}
