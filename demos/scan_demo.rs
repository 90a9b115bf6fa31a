//! End-to-end scan demo against scripted platform surfaces
//!
//! Usage: cargo run --example scan_demo

use std::sync::Arc;

use qrscan::{
    DeviceDescriptor, MockMediaDevices, MockVideoSink, QrScanner, ScanConfig, ScriptedEngine,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    println!("qrscan demo");
    println!("===========\n");

    // A smartphone-like device list: the rear camera should be pinned
    let devices = Arc::new(MockMediaDevices::with_devices(vec![
        DeviceDescriptor::audio("Built-in Microphone", "audio-0"),
        DeviceDescriptor::video("camera2 0, facing front", "front-0"),
        DeviceDescriptor::video("camera2 1, facing back", "back-0"),
    ]));

    // A 1200x800 sink; the frame buffer will fix itself at 600x400
    let sink = Arc::new(MockVideoSink::new(1200, 800));

    // The "external decoder": misses three frames, then finds a code
    let engine = Arc::new(ScriptedEngine::misses_then_match(3, "https://example.org/t/HELLO123"));

    let mut scanner = QrScanner::initialize(sink.clone(), devices, engine, ScanConfig::default())?;

    // Watch scan progress from a separate task
    let mut events = scanner.events();
    let watcher = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            println!("  event: {}", event.event_type());
            if event.is_terminal() {
                break;
            }
        }
    });

    scanner.start_capture().await?;
    sink.set_ready(true);

    println!("Scanning...");
    let payload = scanner.scan().await?;
    println!("\nDecoded payload: {}", payload);
    println!("Frame buffer: {:?}", scanner.buffer_size());

    watcher.await?;
    Ok(())
}
