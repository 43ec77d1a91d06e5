// Opens the camera and converts frames into the working-size buffer the
// whiteboard draws over: mirrored like a looking glass and no wider than the
// configured maximum.

use crate::config::VideoConfig;
use crate::error::Error;
use crate::types::FrameBuffer;

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

use image::RgbImage;
use image::imageops::{self, FilterType};

pub struct CameraCapture {
    cam: Camera,
    mirror: bool,
    width: u32,  // working size after scaling
    height: u32,
}

impl CameraCapture {
    /// Open the configured device at the closest resolution it supports.
    /// Nothing is on screen yet; we just hold an open stream.
    pub fn new(config: &VideoConfig) -> Result<Self, Error> {
        // 1) Choose the device (0 = default webcam).
        let idx = CameraIndex::Index(config.camera_index);

        let fmt = CameraFormat::new(
            Resolution::new(config.request_width, config.request_height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        // 2) Ask for RGB frames as close to the request as the driver allows.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        // 3) Create the camera and start streaming (fails if no device exists).
        let mut cam =
            Camera::new(idx, req).map_err(|e| Error::CameraInit(format!("Open camera: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Start stream: {e}")))?;

        // 4) The stream might choose a slightly different resolution.
        let actual = cam.resolution();
        if (actual.width(), actual.height()) != (config.request_width, config.request_height) {
            log::warn!(
                "Camera {} ignored the requested {}x{}; streaming {}x{} instead",
                config.camera_index,
                config.request_width,
                config.request_height,
                actual.width(),
                actual.height()
            );
        }

        // 5) Everything downstream works at the (possibly downscaled) working size.
        let (width, height) = working_size(actual.width(), actual.height(), config.max_width);
        log::info!(
            "Camera {} streaming {}x{}, working size {}x{}",
            config.camera_index,
            actual.width(),
            actual.height(),
            width,
            height
        );

        Ok(Self { cam, mirror: config.mirror, width, height })
    }

    /// Grab one frame at the working size as 0x00RRGGBB pixels.
    /// What you'll see: once it is composed and presented, the live image
    /// behind the ink advances by one frame.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        // 1) Pull a frame from the camera (blocks until a new one is ready).
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        // 2) Decode whatever the driver delivered (YUYV, MJPEG, ...) into RGB.
        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        // 3) Mirror and shrink, then pack into the buffer every layer shares.
        Ok(FrameBuffer::from_rgb_image(&prepare(rgb_img, self.mirror, self.width, self.height)))
    }

    /// The size of every frame `next_frame` returns.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Downscale to `max_width` keeping aspect ratio; never upscale.
pub fn working_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }
    let h = (height as u64 * max_width as u64 / width as u64) as u32;
    (max_width, h.max(1))
}

/// Mirror and resize a decoded camera image.
/// Visual: your right hand appears on the right, like a looking glass.
pub fn prepare(img: RgbImage, mirror: bool, width: u32, height: u32) -> RgbImage {
    let img = if mirror { imageops::flip_horizontal(&img) } else { img };
    if img.dimensions() == (width, height) {
        img
    } else {
        imageops::resize(&img, width, height, FilterType::Triangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn wide_frames_shrink_to_max_width() {
        assert_eq!(working_size(1920, 1080, 1080), (1080, 607));
        assert_eq!(working_size(640, 480, 1080), (640, 480));
    }

    #[test]
    fn prepare_mirrors_left_to_right() {
        let mut img = RgbImage::new(4, 2);
        img.put_pixel(0, 1, Rgb([255, 0, 0]));
        let out = prepare(img, true, 4, 2);
        assert_eq!(out.get_pixel(3, 1), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(0, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn prepare_resizes_to_working_size() {
        let img = RgbImage::from_pixel(200, 100, Rgb([10, 20, 30]));
        let out = prepare(img, false, 100, 50);
        assert_eq!(out.dimensions(), (100, 50));
        assert_eq!(out.get_pixel(50, 25), &Rgb([10, 20, 30]));
    }
}
