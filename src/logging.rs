//=========================================================================
// Logging
//=========================================================================
//
// One-shot installation of `env_logger` as the `log` backend.
//
// Filter precedence:
//   LoggingConfig::filter → RUST_LOG → Info
//
// Engine components never call this themselves; they log through the
// `Logger` they were built with. Applications call `init_logging` early
// in `main` when they want those records printed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Once;

use env_logger::WriteStyle;
use log::LevelFilter;

//=== LoggingConfig =======================================================

/// Settings for [`init_logging`].
///
/// `filter` uses `env_logger` syntax, e.g. `"info"` or
/// `"stepwise::scene=debug,winit=warn"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: WriteStyle,
}

impl LoggingConfig {
    /// Overrides `RUST_LOG` with an `env_logger` filter string.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets whether output is colored.
    pub fn with_write_style(mut self, write_style: WriteStyle) -> Self {
        self.write_style = write_style;
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

//=== init_logging ========================================================

static INIT: Once = Once::new();

/// Installs the global logger once; later calls are ignored.
///
/// Returns `true` if this call installed the logger. `false` means it was
/// already installed, by this function or by someone else.
pub fn init_logging(config: LoggingConfig) -> bool {
    let mut installed = false;

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(LevelFilter::Info);
            }
        }
        builder.write_style(config.write_style);

        installed = builder.try_init().is_ok();
        if installed {
            log::debug!(target: "stepwise", "Logging initialized");
        }
    });

    installed
}

//=========================================================================
// Unit Tests
//=========================================================================
