//! End-to-end tests: producer and consumer running against a scripted
//! source and an in-memory serial sink.

use sensor_io::{SampleSource, SensorError, SensorKind};
use sensor_node::{NodeConfig, NodeError, NodeState, SensorNode};
use serial_link::{decode, LinkError, FRAME_LEN};
use stats_engine::SummaryRecord;
use std::time::Duration;
use tokio::io::{AsyncReadExt, DuplexStream};

/// Sample `n` reads as pir = n, humidity_heat = 10n, ldr = 100n
#[derive(Default)]
struct Counting {
    n: f32,
    fail_after: Option<usize>,
    samples: usize,
}

impl SampleSource for Counting {
    fn read(&mut self, kind: SensorKind) -> Result<f32, SensorError> {
        if kind == SensorKind::Pir {
            if Some(self.samples) == self.fail_after {
                return Err(SensorError::Bus {
                    kind,
                    address: 0x01,
                    reason: "NoAcknowledge".to_string(),
                });
            }
            self.samples += 1;
            self.n += 1.0;
        }
        Ok(match kind {
            SensorKind::Pir => self.n,
            SensorKind::HumidityHeat => self.n * 10.0,
            SensorKind::Ldr => self.n * 100.0,
        })
    }
}

fn config(capacity: usize, batch_size: usize) -> NodeConfig {
    let mut config = NodeConfig::default();
    config.buffer.capacity = capacity;
    config.sampling.batch_size = batch_size;
    config
}

async fn read_frame(reader: &mut DuplexStream) -> SummaryRecord {
    let mut frame = [0u8; FRAME_LEN];
    reader.read_exact(&mut frame).await.unwrap();
    decode(&frame).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_cycles_summarize_growing_window() {
    let (sink, mut reader) = tokio::io::duplex(1024);
    let node = SensorNode::new(&config(100, 5), Counting::default(), sink).unwrap();
    let state = node.subscribe();
    let task = tokio::spawn(node.run());

    let first = read_frame(&mut reader).await;
    assert!((first.pir.std_dev - 2.0f32.sqrt()).abs() < 1e-5);
    assert_eq!(first.pir.max, 5.0);
    assert_eq!(first.pir.min, 1.0);
    assert_eq!(first.pir.median, 3.0);
    assert_eq!(first.humidity_heat.median, 30.0);
    assert_eq!(first.ldr.max, 500.0);

    // The buffer is not drained, so the second window covers both batches
    let second = read_frame(&mut reader).await;
    assert_eq!(second.pir.max, 10.0);
    assert_eq!(second.pir.min, 1.0);
    assert_eq!(second.pir.median, 5.5);

    assert_eq!(*state.borrow(), NodeState::Running);
    task.abort();
}

#[tokio::test(start_paused = true)]
async fn test_window_keeps_newest_when_full() {
    let (sink, mut reader) = tokio::io::duplex(1024);
    let node = SensorNode::new(&config(4, 5), Counting::default(), sink).unwrap();
    let task = tokio::spawn(node.run());

    // Capacity 4 keeps the last 3 of 5 samples
    let first = read_frame(&mut reader).await;
    assert_eq!(first.pir.min, 3.0);
    assert_eq!(first.pir.max, 5.0);
    assert_eq!(first.pir.median, 4.0);

    let second = read_frame(&mut reader).await;
    assert_eq!(second.pir.min, 8.0);
    assert_eq!(second.pir.max, 10.0);

    task.abort();
}

#[tokio::test(start_paused = true)]
async fn test_sensor_failure_halts_node() {
    let (sink, mut reader) = tokio::io::duplex(1024);
    let source = Counting {
        fail_after: Some(7),
        ..Default::default()
    };
    let node = SensorNode::new(&config(100, 5), source, sink).unwrap();
    let mut state = node.subscribe();

    let result = node.run().await;
    assert!(matches!(result, Err(NodeError::Sensor(SensorError::Bus { .. }))));
    assert!(state.borrow_and_update().is_halted());

    // Exactly one complete batch made it out before the fault
    let first = read_frame(&mut reader).await;
    assert_eq!(first.pir.max, 5.0);
    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).await.unwrap();
    assert!(rest.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_closed_link_halts_node() {
    let (sink, reader) = tokio::io::duplex(1024);
    drop(reader);

    let node = SensorNode::new(&config(100, 3), Counting::default(), sink).unwrap();
    let state = node.subscribe();

    let result = node.run().await;
    assert!(matches!(result, Err(NodeError::Link(LinkError::Closed))));
    assert_eq!(
        *state.borrow(),
        NodeState::Halted(LinkError::Closed.to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_cleanly() {
    let (sink, _reader) = tokio::io::duplex(1024);
    let node = SensorNode::new(&config(100, 30), Counting::default(), sink).unwrap();
    let state = node.subscribe();

    node.run_until(tokio::time::sleep(Duration::from_secs(10)))
        .await
        .unwrap();
    assert_eq!(*state.borrow(), NodeState::Halted("shutdown".to_string()));
}
