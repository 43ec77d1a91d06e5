// What you SEE:
// • Live camera (mirrored) with a tool band across the top.
// • Mouse stands in for the hand: hold LMB to pinch (draw / pick tools),
//   hold RMB to open the hand flat (erase).
// • C clears the canvas. ESC or Q quits.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use air_whiteboard::app::Whiteboard;
use air_whiteboard::camera::CameraCapture;
use air_whiteboard::config::Config;
use air_whiteboard::draw::{Drawer, draw_text_5x7};
use air_whiteboard::error::Error;
use air_whiteboard::hand::{HandPose, SimulatedHand};
use air_whiteboard::types::{Color, FrameBuffer, Point};

#[derive(Parser, Debug)]
#[command(version, about = "Gesture-controlled whiteboard over a live camera feed")]
struct Args {
    /// JSON config file; missing keys use defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Camera device index
    #[arg(long)]
    camera_index: Option<u32>,
    /// Requested capture width
    #[arg(long)]
    width: Option<u32>,
    /// Requested capture height
    #[arg(long)]
    height: Option<u32>,
    /// Draw over a plain background instead of the camera
    #[arg(long)]
    no_camera: bool,
    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

/// Where live frames come from.
enum LiveSource {
    Camera(CameraCapture),
    Still(FrameBuffer),
}

impl LiveSource {
    fn open(config: &Config, no_camera: bool) -> Result<Self, Error> {
        if no_camera {
            let v = &config.video;
            let (w, h) =
                air_whiteboard::camera::working_size(v.request_width, v.request_height, v.max_width);
            log::info!("No camera: using a {}x{} still background", w, h);
            return Ok(LiveSource::Still(FrameBuffer::filled(w as usize, h as usize, Color::DARK_GRAY)));
        }
        Ok(LiveSource::Camera(CameraCapture::new(&config.video)?))
    }

    fn size(&self) -> (usize, usize) {
        match self {
            LiveSource::Camera(cam) => {
                let (w, h) = cam.resolution();
                (w as usize, h as usize)
            }
            LiveSource::Still(fb) => fb.size(),
        }
    }

    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        match self {
            LiveSource::Camera(cam) => cam.next_frame(),
            LiveSource::Still(fb) => Ok(fb.clone()),
        }
    }
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(i) = args.camera_index {
        config.video.camera_index = i;
    }
    if let Some(w) = args.width {
        config.video.request_width = w;
    }
    if let Some(h) = args.height {
        config.video.request_height = h;
    }
    config.validate()?;

    if args.dump_config {
        let json = serde_json::to_string_pretty(&config).map_err(Error::ConfigSerialize)?;
        println!("{json}");
        return Ok(());
    }

    let mut source = LiveSource::open(&config, args.no_camera)?;
    let (w, h) = source.size();
    let mut board = Whiteboard::new(&config, w, h)?;
    let mut drawer = Drawer::new("Air Whiteboard", w, h)?;

    log::info!("Whiteboard initialized. LMB pinch, RMB erase, C clear, ESC/Q quit.");

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    while drawer.is_open() && !drawer.quit_pressed() {
        let now = Instant::now();
        let live = source.next_frame()?;

        if drawer.c_pressed_once() {
            log::info!("Canvas cleared");
            board.clear_canvas();
        }

        let hand = drawer.mouse_pos().map(|(mx, my)| {
            let pose = HandPose::from_buttons(drawer.left_mouse_down(), drawer.right_mouse_down());
            SimulatedHand::landmarks(Point::new(mx as i32, my as i32), pose)
        });

        let mut screen = board.process(&live, hand.as_ref())?;
        draw_text_5x7(&mut screen, 10, h as i32 - 20, &hud_fps_text, Color::GREEN.pack());
        drawer.present(&screen)?;

        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::debug!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
