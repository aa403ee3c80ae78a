use std::io::IsTerminal;
use std::process;

use tracing::{error, info};

use crate::app::App;
use crate::config::Config;
use crate::http_client::{FetchError, MovieFetcher};
use crate::model::Model;

pub mod app;
pub mod config;
pub mod event;
pub mod http_client;
pub mod logging;
pub mod model;
pub mod movie;
pub mod ui;

#[cfg(test)]
mod test_utils;

/// Exit status when the film list cannot be fetched.
const FETCH_FAILURE_EXIT_CODE: i32 = 1;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();

    let config = Config::default();
    let fetcher = MovieFetcher::new(config.base_url.as_str())?;
    info!(base_url = fetcher.base_url(), "fetching films");

    let Ok(model) = load_model(&fetcher) else {
        process::exit(FETCH_FAILURE_EXIT_CODE);
    };

    if !std::io::stdout().is_terminal() {
        print!("{}", model.view());
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = App::new(model, config.tick_rate).run(terminal);
    ratatui::restore();
    result
}

/// Fetches the films and builds the model. A failure is logged here with the
/// error as a structured field; the caller only decides to exit.
fn load_model(fetcher: &MovieFetcher) -> Result<Model, FetchError> {
    fetcher
        .get_movies()
        .map(Model::new)
        .inspect_err(|err| error!(error = %err, "failed to get movies"))
}
