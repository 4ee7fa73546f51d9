use cfg_if::cfg_if;
use clap::Parser;
use env_logger::Env;
use log::debug;
use std::path::PathBuf;
use thiserror::Error;

mod libtnpsc;

cfg_if! {
    if #[cfg(feature = "gui")] {
        mod gui;
        use gui::init_gui as run;
    } else if #[cfg(feature = "cli")] {
        mod cli;
        use cli::cli_loop as run;
    } else {
        compile_error!("enable the `cli` or `gui` feature");
    }
}

use crate::libtnpsc::dataset::{default_banks, find_bank, Bank, Dataset, DatasetError};
use crate::libtnpsc::router::Route;
use crate::libtnpsc::theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "TNPSC Question Bank")]
#[command(version, about, long_about = None)]
struct Args {
    /// Question list to use instead of the bundled one
    #[arg(short, long, value_name = "FILE")]
    questions: Option<PathBuf>,
    /// Skip the bank list and go straight to registration for this year
    #[arg(short, long, value_name = "YEAR")]
    bank: Option<String>,
    #[arg(long, default_value = "false")]
    shuffle_options: bool,
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("no question bank for year {0}")]
    UnknownBank(String),
    #[cfg(feature = "gui")]
    #[error("cannot open the window: {0}")]
    Gui(#[from] eframe::Error),
}

/// Everything the front-ends need, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset: Dataset,
    pub banks: Vec<Bank>,
    pub start: Route,
    pub shuffle_options: bool,
    pub theme: Theme,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    let dataset = match &args.questions {
        Some(path) => Dataset::from_file(path)?,
        None => Dataset::bundled()?,
    };
    let banks = default_banks();
    let start = match args.bank.as_deref() {
        Some(year) => match find_bank(&banks, year) {
            Some(bank) => Route::Registration { bank },
            None => return Err(Error::UnknownBank(year.to_string())),
        },
        None => Route::Banks,
    };
    debug!("[Setup] {} questions, starting at {:?}", dataset.len(), start);

    let config = AppConfig {
        dataset,
        banks,
        start,
        shuffle_options: args.shuffle_options,
        theme: Theme::default(),
    };

    run(config)
}
