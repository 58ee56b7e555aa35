use clap::{Args, Parser, Subcommand};
use talent_ops::error::AppError;

use crate::commands::{run_org_tree, run_score, OrgTreeArgs, ScoreArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Ops",
    about = "Run the Talent Ops API or inspect org and evaluation data from the command line",
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
    /// Organisation hierarchy tools
    Org {
        #[command(subcommand)]
        command: OrgCommand,
    },
    /// Compute the soft-skill aggregate for a set of trait ratings
    Score(ScoreArgs),
}

#[derive(Subcommand, Debug)]
enum OrgCommand {
    /// Print the org hierarchy as an outline
    Tree(OrgTreeArgs),
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
        Command::Org {
            command: OrgCommand::Tree(args),
        } => run_org_tree(args),
        Command::Score(args) => run_score(args),
    }
}
