use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

mod args;
mod camera;
mod config;
mod gesture;
mod hub;
mod landmarker;
mod server;
mod tracker;
mod types;

use args::Args;
use camera::CameraSource;
use config::AppConfig;
use hub::StateHub;
use landmarker::HandLandmarker;
use tracker::Tracker;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        return CameraSource::list();
    }

    let mut config = AppConfig::load()?;
    if let Some(index) = args.cam_index {
        config.camera.index = index;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(model) = args.model {
        config.detection.model_path = model;
    }
    if args.mirror {
        config.camera.mirror = true;
    } else if args.no_mirror {
        config.camera.mirror = false;
    }

    // An unopenable camera is fatal before the server ever binds.
    let camera =
        CameraSource::new(config.camera.index).context("Cannot open webcam")?;
    println!("Tracking hand on camera: {}", camera.name());

    let landmarker = HandLandmarker::new(&config.detection)?;

    let hub = StateHub::new(16);
    let tracker = Tracker::new(
        camera,
        landmarker,
        hub.clone(),
        config.camera.mirror,
        Duration::from_millis(config.stream.publish_interval_ms),
    );

    // The capture loop owns the camera and the model session for the
    // lifetime of the process.
    std::thread::spawn(move || tracker.run());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(hub, &config.server.host, config.server.port))
}
