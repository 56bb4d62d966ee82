use std::sync::Once;

use log::LevelFilter;

/// Where the log filter comes from, in priority order: `env_filter`, then
/// `RUST_LOG`, then info with the wgpu/naga internals at warn.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter string, e.g. `"glint_engine=debug,wgpu_core=warn"`.
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

static INIT: Once = Once::new();

/// Installs the global `env_logger` backend. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => quiet_gpu_defaults(&mut builder),
        }

        builder.write_style(config.write_style);

        // A logger installed earlier (test harness) wins.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

/// Info for the engine and demos; warn for the wgpu and naga internals, which
/// log every resource creation at info.
fn quiet_gpu_defaults(builder: &mut env_logger::Builder) {
    builder.filter_level(LevelFilter::Info);
    for module in ["wgpu_core", "wgpu_hal", "naga"] {
        builder.filter_module(module, LevelFilter::Warn);
    }
}
