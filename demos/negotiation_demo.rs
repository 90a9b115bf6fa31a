//! Camera negotiation demo: shows which constraint each device list yields
//!
//! Usage: cargo run --example negotiation_demo

use qrscan::{negotiate_constraints, DeviceDescriptor, MockMediaDevices, VideoConstraint};
use tracing_subscriber::EnvFilter;

async fn show(name: &str, devices: &MockMediaDevices) -> anyhow::Result<()> {
    let constraints = negotiate_constraints(devices).await?;
    match constraints.video {
        VideoConstraint::Any => println!("{:<24} -> unconstrained video", name),
        VideoConstraint::Device { exact } => {
            println!("{:<24} -> pinned device {}", name, exact)
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let smartphone = MockMediaDevices::with_devices(vec![
        DeviceDescriptor::video("camera2 0, facing front", "front-0"),
        DeviceDescriptor::video("camera2 1, facing back", "back-0"),
    ]);
    show("smartphone", &smartphone).await?;

    let laptop = MockMediaDevices::with_devices(vec![DeviceDescriptor::video(
        "Integrated Webcam",
        "video-0",
    )]);
    show("laptop", &laptop).await?;

    let prompting = MockMediaDevices::with_devices(vec![DeviceDescriptor::video(
        "camera2 1, facing back",
        "back-0",
    )])
    .prompting();
    show("prompting platform", &prompting).await?;
    println!(
        "prompting platform enumerated {} times",
        prompting.enumeration_count()
    );

    Ok(())
}
