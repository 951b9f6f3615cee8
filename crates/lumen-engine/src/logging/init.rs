use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "lumen_engine=debug,wgpu=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Route output through the test harness capture instead of stderr.
    pub is_test: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            is_test: false,
        }
    }
}

impl LoggingConfig {
    /// Debug-level, captured output for `#[test]` functions.
    pub fn for_tests() -> Self {
        Self {
            env_filter: Some("lumen_engine=debug".to_owned()),
            write_style: env_logger::WriteStyle::Never,
            is_test: true,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent. If another logger was installed first (e.g. by a host application),
/// that logger is kept and a debug line is emitted through it.
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

        builder.write_style(config.write_style).is_test(config.is_test);

        match builder.try_init() {
            Ok(()) => log::debug!("logging initialized"),
            Err(_) => log::debug!("logger already installed; keeping existing"),
        }
    });
}
