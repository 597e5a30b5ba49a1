//! Logger initialization and call tracing.
//!
//! The crate logs through the `log` facade. Binaries call [`init_logging`]
//! once to install `env_logger`; libraries embedding the crate can install
//! any other backend instead.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax, e.g.
/// `"info"` or `"stagehand=debug,wgpu=warn"`. When unset, `RUST_LOG` is
/// consulted, then `info` is used.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_err() {
            log::warn!("a logger was already installed; keeping it");
            return;
        }

        log::debug!("logging initialized");
    });
}

/// Logs a public entry point at trace level under `stagehand::calls`.
///
/// Expands to nothing unless the `trace-calls` feature is enabled.
macro_rules! trace_call {
    ($($arg:tt)+) => {
        #[cfg(feature = "trace-calls")]
        {
            log::trace!(target: "stagehand::calls", $($arg)+);
        }
    };
}

pub(crate) use trace_call;
