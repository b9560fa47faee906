use crate::batch::{run_lexicon, run_segment, LexiconArgs, SegmentArgs};
use crate::server;
use cafe_segments::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Cafe Segments",
    about = "Score, segment and recommend coffee-shop venues from review data",
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
    /// Segment venues from CSV exports and print recommendations
    Segment(SegmentArgs),
    /// Print the active lexicon and thresholds
    Lexicon(LexiconArgs),
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
        Command::Segment(args) => run_segment(args),
        Command::Lexicon(args) => run_lexicon(args),
    }
}
