mod cli;
mod infra;
mod report;
mod routes;
mod server;

use worship_staffing::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
