//! Node supervisor
//!
//! Wires the producer and consumer around one shared buffer and handshake,
//! runs both, and halts on the first fatal error.

use crate::config::NodeConfig;
use crate::consumer::Consumer;
use crate::producer::Producer;
use crate::NodeError;
use handshake::Handshake;
use ring_buffer::SharedBuffer;
use sensor_io::SampleSource;
use serial_link::Transmitter;
use std::future::Future;
use tokio::io::AsyncWrite;
use tokio::sync::watch;
use tokio::task::JoinError;
use tracing::{error, info};

/// Lifecycle of the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    /// Built but not yet running
    Idle,
    /// Both tasks running
    Running,
    /// Stopped; no further task execution
    Halted(String),
}

impl NodeState {
    /// True once the node has stopped for good
    pub fn is_halted(&self) -> bool {
        matches!(self, NodeState::Halted(_))
    }
}

/// Producer and consumer bound to the same buffer
pub struct SensorNode<S, W> {
    producer: Producer<S>,
    consumer: Consumer<W>,
    buffer: SharedBuffer,
    state: watch::Sender<NodeState>,
}

impl<S, W> SensorNode<S, W>
where
    S: SampleSource + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Build a node from configuration, a sample source and a byte sink
    pub fn new(config: &NodeConfig, source: S, sink: W) -> Result<Self, NodeError> {
        config.validate()?;

        let buffer = SharedBuffer::new(config.buffer.capacity)?;
        let handshake = Handshake::new().with_wait_timeout(config.handshake.wait_timeout());

        let producer = Producer::new(
            source,
            buffer.clone(),
            handshake.clone(),
            config.sampling.clone(),
        );
        let consumer = Consumer::new(
            buffer.clone(),
            handshake,
            Transmitter::new(sink, config.link.link_config()),
            config.buffer.snapshot,
        );

        info!(
            "Sensor node ready: capacity={}, batch={}x{}ms",
            config.buffer.capacity, config.sampling.batch_size, config.sampling.interval_ms
        );

        Ok(Self {
            producer,
            consumer,
            buffer,
            state: watch::channel(NodeState::Idle).0,
        })
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<NodeState> {
        self.state.subscribe()
    }

    /// Handle to the shared buffer
    pub fn buffer(&self) -> SharedBuffer {
        self.buffer.clone()
    }

    /// Run until a task fails
    pub async fn run(self) -> Result<(), NodeError> {
        self.run_until(std::future::pending()).await
    }

    /// Run until a task fails or `shutdown` completes
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), NodeError>
    where
        F: Future<Output = ()>,
    {
        let mut producer = tokio::spawn(self.producer.run());
        let mut consumer = tokio::spawn(self.consumer.run());
        self.state.send_replace(NodeState::Running);
        info!("Sensor node running");

        let result = tokio::select! {
            joined = &mut producer => flatten("producer", joined),
            joined = &mut consumer => flatten("consumer", joined),
            _ = shutdown => Ok(()),
        };

        producer.abort();
        consumer.abort();

        match &result {
            Ok(()) => {
                info!("Sensor node shut down");
                self.state.send_replace(NodeState::Halted("shutdown".to_string()));
            }
            Err(e) => {
                error!("Sensor node halted: {}", e);
                self.state.send_replace(NodeState::Halted(e.to_string()));
            }
        }
        result
    }
}

fn flatten(
    task: &'static str,
    joined: Result<Result<(), NodeError>, JoinError>,
) -> Result<(), NodeError> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(NodeError::Task(task, e.to_string())),
    }
}
