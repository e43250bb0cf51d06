mod cli;
mod demo;
mod infra;
mod render;
mod replay;
mod report;

use grade_calc::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
