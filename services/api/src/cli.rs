use crate::demo::{run_demo, run_evaluate, run_rank, DemoArgs, EvaluateArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talent_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Match",
    about = "Score and rank candidates against job offers",
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
    /// Evaluate one seeded candidate against one seeded offer
    Evaluate(EvaluateArgs),
    /// Evaluate every seeded candidate for an offer and print the ranking
    Rank(RankArgs),
    /// Walk through the reference scoring scenario
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

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Rank(args) => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}
