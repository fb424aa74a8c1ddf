use crate::calc::{run_calc, CalcArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use member_board::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Member Board",
    about = "Run the member board API or evaluate arithmetic from the command line",
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
    /// Evaluate a "<num1> <op> <num2>" expression read from stdin
    Calc(CalcArgs),
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
        Command::Calc(args) => run_calc(args),
    }
}
