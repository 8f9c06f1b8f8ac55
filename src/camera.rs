use anyhow::{anyhow, Context, Result};
use colored::*;
use image::{ImageBuffer, Rgb};
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType},
    Camera,
};

use crate::tracker::FrameSource;

/// The webcam, opened once at startup and owned by the tracker loop for
/// the lifetime of the process.
pub struct CameraSource {
    camera: Camera,
}

impl CameraSource {
    pub fn new(index: u32) -> Result<Self> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .with_context(|| format!("Cannot open webcam at index {index} (try --cam-index 1)"))?;
        camera
            .open_stream()
            .map_err(|e| anyhow!(e))
            .context("Failed to open camera stream")?;

        println!(
            "{}",
            format!("Opened camera: {}", camera.info().human_name()).green()
        );
        println!("Format: {}", camera.camera_format());

        Ok(Self { camera })
    }

    /// Print the available capture devices, for `--list`.
    pub fn list() -> Result<()> {
        let cameras = nokhwa::query(ApiBackend::Auto)?;
        println!("Available cameras:");
        for cam in cameras {
            println!("{:<5} | {}", cam.index(), cam.human_name());
        }
        Ok(())
    }

    pub fn name(&self) -> String {
        self.camera.info().human_name()
    }
}

impl FrameSource for CameraSource {
    fn next_frame(&mut self) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>> {
        let frame = self
            .camera
            .frame()
            .map_err(|e| anyhow!(e))
            .context("Failed to read frame")?;
        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| anyhow!(e))
            .context("Failed to decode frame")?;
        Ok(decoded)
    }
}
