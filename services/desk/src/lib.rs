mod cli;
mod demo;
mod export;
mod infra;
mod render;
mod session;

use visitor_desk::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
