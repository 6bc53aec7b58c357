use horloge_engine::logging::{init_logging, LoggingConfig};
use horloge_watch::Watch;

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = Watch::new().run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
