use anyhow::Result;

use clearpass_engine::device::GpuInit;
use clearpass_engine::logging::{init_logging, LoggingConfig};
use clearpass_engine::window::{Runtime, RuntimeConfig, SceneConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("clearpass {}", env!("CARGO_PKG_VERSION"));

    Runtime::run(
        RuntimeConfig::default(),
        GpuInit::default(),
        SceneConfig::default(),
    )
}
