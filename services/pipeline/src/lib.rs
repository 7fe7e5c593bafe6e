mod cli;
mod commands;

use crossrd::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
