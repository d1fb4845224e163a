//! Utilities: logging setup (verbosity flags -> tracing level, `RUST_LOG`
//! override).
//!
//! Key items:
//!   init_logging / derive_level

/// Logging helpers.
pub mod logging {
    use std::sync::Once;
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    /// Map `-v` count and `-q` to a level. Quiet wins.
    pub fn derive_level(verbose: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::ERROR;
        }
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Install the stderr subscriber. `RUST_LOG` takes precedence over
    /// `level`. Only the first call has any effect.
    pub fn init_logging(level: LevelFilter) {
        INIT.call_once(|| {
            let filter = if std::env::var("RUST_LOG").is_ok() {
                EnvFilter::from_default_env()
            } else {
                EnvFilter::default().add_directive(level.into())
            };

            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        });
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn quiet_wins_over_verbose() {
            assert_eq!(derive_level(2, true), LevelFilter::ERROR);
        }

        #[test]
        fn verbosity_steps() {
            assert_eq!(derive_level(0, false), LevelFilter::WARN);
            assert_eq!(derive_level(1, false), LevelFilter::DEBUG);
            assert_eq!(derive_level(5, false), LevelFilter::TRACE);
        }

        #[test]
        fn init_is_idempotent() {
            init_logging(LevelFilter::WARN);
            init_logging(LevelFilter::TRACE);
        }
    }
}

pub use logging::{derive_level, init_logging};
