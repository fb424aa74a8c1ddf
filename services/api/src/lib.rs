mod calc;
mod cli;
mod infra;
mod routes;
mod server;

use member_board::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
