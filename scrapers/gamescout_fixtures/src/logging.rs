use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

/// `RUST_LOG` when set and valid, otherwise `info` so warnings and progress
/// still reach the terminal.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

pub fn init() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    #[serial]
    fn test_defaults_to_info_without_rust_log() {
        env::remove_var("RUST_LOG");
        assert_eq!(env_filter().max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    #[serial]
    fn test_rust_log_overrides_default() {
        env::set_var("RUST_LOG", "debug");
        let filter = env_filter();
        env::remove_var("RUST_LOG");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
