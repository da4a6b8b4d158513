mod cli;
mod render;

use vacancy_hub::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
