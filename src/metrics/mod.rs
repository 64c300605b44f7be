use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_GAMES: IntGauge =
        IntGauge::new("atrapapalabra_active_games", "Running game actors")
            .expect("metric cannot be created");
    pub static ref WORDS_GUESSED: IntCounter =
        IntCounter::new("atrapapalabra_words_guessed_total", "Words guessed correctly")
            .expect("metric cannot be created");
    pub static ref WORDS_SKIPPED: IntCounter =
        IntCounter::new("atrapapalabra_words_skipped_total", "Words skipped")
            .expect("metric cannot be created");
    pub static ref TURNS_PASSED: IntCounter =
        IntCounter::new("atrapapalabra_turns_passed_total", "Turns passed, manually or on time up")
            .expect("metric cannot be created");
    pub static ref GAMES_RECORDED: IntCounter =
        IntCounter::new("atrapapalabra_games_recorded_total", "Games appended to the history")
            .expect("metric cannot be created");
}

pub fn register_metrics() {
    let collectors: [Box<dyn prometheus::core::Collector>; 5] = [
        Box::new(ACTIVE_GAMES.clone()),
        Box::new(WORDS_GUESSED.clone()),
        Box::new(WORDS_SKIPPED.clone()),
        Box::new(TURNS_PASSED.clone()),
        Box::new(GAMES_RECORDED.clone()),
    ];
    for collector in collectors {
        if let Err(error) = REGISTRY.register(collector) {
            log::warn!("Collector cannot be registered. Error: '{error}'.");
        }
    }
}

/// Text exposition of every registered metric.
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(error) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        log::error!("Could not encode metrics: {}", error);
    }
    match String::from_utf8(buffer) {
        Ok(metrics) => metrics,
        Err(error) => {
            log::error!("Metrics could not be from_utf8'd: {}", error);
            String::default()
        }
    }
}
