use crate::render::{print_records, print_report};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use vacancy_hub::config::AppConfig;
use vacancy_hub::error::AppError;
use vacancy_hub::ingest::ingest;
use vacancy_hub::search::HeadHunterClient;
use vacancy_hub::storage::{AnyStore, BackendKind};
use vacancy_hub::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "vacancy-hub",
    about = "Fetch job vacancies and manage them in a local file store",
    version
)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct StoreArgs {
    /// Storage backend (json, csv, xlsx, txt). Overrides VACANCY_BACKEND.
    #[arg(long, global = true)]
    backend: Option<BackendKind>,
    /// Store file. Overrides VACANCY_STORE_PATH and the backend default.
    #[arg(long, global = true)]
    path: Option<PathBuf>,
    /// Print records as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the vacancy API by title keyword and store the results
    Search {
        keyword: String,
        /// Listings to request (1-100). Defaults to HH_PAGE_SIZE.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        per_page: Option<u32>,
    },
    /// Show every stored vacancy
    List,
    /// Show the best-paid stored vacancies
    Top {
        #[arg(default_value_t = 10)]
        count: usize,
    },
    /// Show vacancies whose field equals the value exactly
    Find { field: String, value: String },
    /// Remove the vacancy with the given id
    Delete { id: i64 },
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(backend) = cli.store.backend {
        config.storage.backend = backend;
    }
    if let Some(path) = cli.store.path {
        config.storage.path = Some(path);
    }
    telemetry::init(&config.telemetry)?;

    let path = config.storage.resolved_path();
    let mut store = AnyStore::open(config.storage.backend, &path, &config.storage.sheet_name)?;
    info!(
        environment = ?config.environment,
        backend = %store.kind(),
        path = %path.display(),
        "opened vacancy store"
    );
    let as_json = cli.store.json;

    match cli.command {
        Command::Search { keyword, per_page } => {
            let client = HeadHunterClient::new(config.search.base_url)?;
            let page_size = per_page.unwrap_or(config.search.page_size);
            let report = ingest(&client, &mut store, &keyword, page_size)?;
            print_report(&report, as_json)
        }
        Command::List => print_records(&store.list(), as_json),
        Command::Top { count } => print_records(&store.top_by_salary(count), as_json),
        Command::Find { field, value } => print_records(&store.find(&field, &value)?, as_json),
        Command::Delete { id } => {
            store.delete(id)?;
            println!("Vacancy {id} is no longer in {}", store.path().display());
            Ok(())
        }
    }
}
