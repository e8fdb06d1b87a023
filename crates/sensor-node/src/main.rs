//! Sensor Node - Main Entry Point

use sensor_node::{build_source, init_logging, NodeConfig, SensorNode};
use serial_link::open_serial;
use std::path::PathBuf;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os("SENSOR_NODE_CONFIG").map(PathBuf::from);
    let config = NodeConfig::load(config_path.as_deref())?;
    init_logging(&config.logging)?;

    info!("=== Sensor Node v{} ===", env!("CARGO_PKG_VERSION"));

    let source = build_source(&config)?;
    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping");
        }
    };

    match config.link.port.as_deref() {
        Some(port) => {
            let sink = open_serial(port, config.link.baud_rate)?;
            SensorNode::new(&config, source, sink)?
                .run_until(shutdown)
                .await?;
        }
        None => {
            warn!("No serial port configured, summaries will be discarded");
            SensorNode::new(&config, source, tokio::io::sink())?
                .run_until(shutdown)
                .await?;
        }
    }

    Ok(())
}
