//! Logging hooks for Sift.
//!
//! Every crate in the workspace emits through the `tracing` macros and
//! never installs a subscriber of its own; applications that already run a
//! subscriber see Sift's events with no setup. [`init`] exists for
//! binaries and tests that have no subscriber yet: it installs a plain
//! `fmt` subscriber filtered by the `SIFT_LOG` environment variable
//! (an `EnvFilter` directive string such as `sift_query=debug` or
//! `sift_sql=trace`). It requires the `tracing-subscriber` feature and is
//! a no-op otherwise.
//!
//! ```rust,no_run
//! sift_query::logging::init();
//! ```

/// Install a `fmt` subscriber filtered by `SIFT_LOG`, once.
///
/// Does nothing when `SIFT_LOG` is unset, when the `tracing-subscriber`
/// feature is disabled, or when a global subscriber is already installed.
/// Safe to call repeatedly.
pub fn init() {
    #[cfg(feature = "tracing-subscriber")]
    {
        use std::sync::Once;

        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let Ok(directives) = std::env::var("SIFT_LOG") else {
                return;
            };
            let filter = tracing_subscriber::EnvFilter::try_new(directives)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
            // A subscriber installed by the host application wins.
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_reentrant() {
        init();
        init();
    }
}
