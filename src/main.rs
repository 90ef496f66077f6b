use quiz_rankings::config::{self, Config};
use quiz_rankings::error::{RankingError, EXIT_FAILURE, EXIT_SUCCESS};
use quiz_rankings::logging;
use quiz_rankings::services::excel::open_workbook_file;
use quiz_rankings::services::{write_outputs, RankingPipeline};

fn main() {
    if let Err(e) = logging::init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(EXIT_FAILURE);
    }

    let config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Config error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    match run(&config) {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            match &err {
                RankingError::InputNotFound { path } => {
                    tracing::error!("Input file not found: {}", path.display())
                }
                other => tracing::error!("An error occurred: {}", other),
            }
            std::process::exit(err.exit_code());
        }
    }
}

fn run(config: &Config) -> Result<(), RankingError> {
    let mut workbook = open_workbook_file(&config.input_path)?;
    let table = RankingPipeline::new(&config.policy).run(&mut workbook)?;

    tracing::info!("Final rankings:\n{}", table.frame());
    tracing::info!("Columns: {:?}", table.column_names());

    write_outputs(&table, &config.table_path(), &config.json_path())?;
    Ok(())
}
