use std::sync::Once;

use log::LevelFilter;

/// Level used when `RUST_LOG` is unset. Kept at warn so stderr output does
/// not interleave with the redrawn box.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

static INIT: Once = Once::new();

/// Initializes the global logger once. `RUST_LOG` wins over `DEFAULT_LEVEL`.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match std::env::var("RUST_LOG") {
            Ok(filter) => {
                builder.parse_filters(&filter);
            }
            Err(_) => {
                builder.filter_level(DEFAULT_LEVEL);
            }
        }

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
