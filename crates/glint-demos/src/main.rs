mod app;
mod scenes;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use glint_engine::device::GpuInit;
use glint_engine::logging::{init_logging, LoggingConfig};
use glint_engine::window::{Runtime, RuntimeConfig};

use app::DemoApp;
use scenes::SceneKind;

/// Animated render-loop demos.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Scene to run.
    #[arg(long, value_enum, default_value_t = SceneKind::Cube)]
    scene: SceneKind,

    /// Redraw period in milliseconds; 0 redraws continuously.
    #[arg(long, default_value_t = 15)]
    interval_ms: u64,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 640.0)]
    width: f64,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 480.0)]
    height: f64,

    /// Log filter (`env_logger` syntax); overrides `RUST_LOG`.
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: format!("glint: {}", self.scene_name()),
            initial_size: LogicalSize::new(self.width, self.height),
            frame_interval: (self.interval_ms > 0).then(|| Duration::from_millis(self.interval_ms)),
            ..RuntimeConfig::default()
        }
    }

    fn scene_name(&self) -> String {
        use clap::ValueEnum;
        self.scene
            .to_possible_value()
            .map(|v| v.get_name().to_owned())
            .unwrap_or_else(|| format!("{:?}", self.scene))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let scene = args.scene.build();
    log::info!("starting scene `{}`", scene.label);

    Runtime::run(args.runtime_config(), GpuInit::default(), DemoApp::new(scene))
}
