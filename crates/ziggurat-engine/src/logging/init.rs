use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` names one. The wgpu
/// internals are chatty at `info`.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "warn",
/// "ziggurat_engine=debug,wgpu_core=warn").
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
    /// Filter to install: `env_filter`, then `rust_log`, then [`DEFAULT_FILTER`].
    /// Blank values count as unset.
    pub fn resolve_filter(&self, rust_log: Option<&str>) -> String {
        let set = |s: &&str| !s.trim().is_empty();
        self.env_filter
            .as_deref()
            .filter(set)
            .or(rust_log.filter(set))
            .unwrap_or(DEFAULT_FILTER)
            .trim()
            .to_owned()
    }
}

static INIT: Once = Once::new();

/// Installs an `env_logger` logger once.
///
/// Subsequent calls are ignored, as are calls made after the host installed
/// a logger of its own.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = config.resolve_filter(rust_log.as_deref());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter).write_style(config.write_style);

        if builder.try_init().is_err() {
            return;
        }
        log::debug!("logging initialized with filter {filter:?}");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_filter(filter: &str) -> LoggingConfig {
        LoggingConfig { env_filter: Some(filter.into()), ..LoggingConfig::default() }
    }

    // ── filter precedence ─────────────────────────────────────────────────

    #[test]
    fn explicit_filter_wins_over_rust_log() {
        let config = with_filter("ziggurat_engine=debug");
        assert_eq!(config.resolve_filter(Some("trace")), "ziggurat_engine=debug");
    }

    #[test]
    fn rust_log_used_without_explicit_filter() {
        assert_eq!(LoggingConfig::default().resolve_filter(Some("warn")), "warn");
    }

    #[test]
    fn default_filter_quiets_wgpu() {
        assert_eq!(LoggingConfig::default().resolve_filter(None), DEFAULT_FILTER);
        assert!(DEFAULT_FILTER.contains("wgpu_core=warn"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        assert_eq!(with_filter("  ").resolve_filter(Some("warn")), "warn");
        assert_eq!(LoggingConfig::default().resolve_filter(Some("")), DEFAULT_FILTER);
    }

    // ── install ───────────────────────────────────────────────────────────

    #[test]
    fn init_is_idempotent() {
        init_logging(with_filter("ziggurat_engine=debug"));
        init_logging(LoggingConfig::default());
        log::debug!("still alive");
    }
}
