mod terminal;

use atrapapalabra::config::Config;
use atrapapalabra::{metrics, startup};

#[tokio::main]
async fn main() {
    std_logger::Config::logfmt().init();

    let config = Config::get().expect("ERROR: Unable to get the Config.");
    metrics::register_metrics();

    let game = startup::spawn_game(&config);
    if let Err(error) = terminal::run(game).await {
        log::error!("The game stopped unexpectedly. Error: '{error}'.");
    }

    log::debug!("{}", metrics::render());
}
