mod cli;
mod infra;
mod preview;
mod routes;
mod server;

use riverbank_intake::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
