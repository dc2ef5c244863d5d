//! Analog clock face rendering.
//!
//! [`angles`] turns an instant into hand rotations, [`face::ClockFaceRenderer`]
//! turns rotations into an ordered list of draw calls, and [`canvas::Canvas`]
//! rasterizes those calls into an RGBA frame. [`Clock`] wires the three to a
//! window refreshed from the wall clock.

// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod angles;
pub mod assets;
pub mod canvas;
pub mod cli;
pub mod config;
pub mod error;
pub mod face;
pub mod geometry;
pub mod logging;
pub mod scene;

// External crate imports
use bon::Builder;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;

// Standard library imports
use std::path::PathBuf;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use angles::{compute_angles, hand_angles, timezone_abbreviation, HandAngles};
pub use assets::{AssetDirectory, BackgroundProvider};
pub use canvas::Canvas;
pub use config::{Color, ColorScheme, FaceConfig, Theme};
pub use error::{ClockError, FaceError};
pub use face::{ClockFaceRenderer, Style, StyleFlags};
pub use geometry::GeometryFrame;
pub use scene::{DrawCommand, Scene, Surface};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

#[derive(Debug, Clone, Builder)]
pub struct ClockConfig {
    #[builder(default = "Clock".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 300)]
    pub window_width: usize,
    #[builder(default = 300)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Face configuration
    #[builder(default = StyleFlags::ALL)]
    pub style: StyleFlags,
    #[builder(default)]
    pub colors: ColorScheme,
    #[builder(default = chrono_tz::UTC)]
    pub timezone: Tz,
    #[builder(default)]
    pub face: FaceConfig,
    /// Fill behind the face, visible in the corners and through the pivot.
    #[builder(default = Color::BLACK)]
    pub window_background: Color,

    // Resources
    pub font_data: Option<Vec<u8>>,
    pub asset_dir: Option<PathBuf>,
}

/// A clock face bound to its configuration and loaded resources.
pub struct Clock {
    config: ClockConfig,
    font: Option<Font<'static>>,
    assets: Option<AssetDirectory>,
}

impl Clock {
    pub fn new(config: ClockConfig) -> Result<Self, ClockError> {
        let font = match &config.font_data {
            Some(data) => Some(
                Font::try_from_vec(data.clone())
                    .ok_or_else(|| ClockError::Font("unsupported font data".to_string()))?,
            ),
            None => None,
        };
        let assets = config
            .asset_dir
            .as_deref()
            .map(AssetDirectory::load)
            .transpose()?;

        log::info!(
            "clock configured for {} ({:?}, font: {}, assets: {})",
            config.timezone.name(),
            config.style,
            font.is_some(),
            assets.as_ref().map_or(0, AssetDirectory::len)
        );
        Ok(Self {
            config,
            font,
            assets,
        })
    }

    /// Renders the face for `now` into an RGBA8 buffer of `width` x `height`.
    pub fn render_frame(&self, frame: &mut [u8], width: usize, height: usize, now: DateTime<Utc>) {
        let timezone = &self.config.timezone;
        let angles = hand_angles(&now.with_timezone(timezone));
        let label = timezone_abbreviation(timezone, &now);

        let mut canvas = Canvas::new(frame, width, height).with_font(self.font.as_ref());
        canvas.clear(self.config.window_background);

        let mut renderer = ClockFaceRenderer::new(&self.config.face);
        if let Some(assets) = &self.assets {
            renderer = renderer.with_backgrounds(assets);
        }
        renderer.render(
            &mut canvas,
            GeometryFrame::new(width as f64, height as f64),
            angles,
            self.config.style,
            &self.config.colors,
            label.as_deref(),
        );
    }

    /// Opens a window and redraws the face from the wall clock until it is closed.
    pub fn show(&self) -> Result<(), ClockError> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .with_resizable(true)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let frame_duration = Duration::from_secs_f64(1.0 / self.config.max_framerate.max(1.0));
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        log::trace!("window minimized, keeping the old surface");
                        return;
                    }
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                        log::warn!("failed to resize pixel buffer: {err}");
                    }
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        log::warn!("failed to resize surface: {err}");
                    }
                }
                WindowEvent::RedrawRequested => {
                    self.render_frame(pixels.frame_mut(), fb_width, fb_height, Utc::now());
                    if let Err(err) = pixels.render() {
                        log::error!("failed to present frame: {err}");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if last_frame.elapsed() >= frame_duration {
                    window_clone.request_redraw();
                    last_frame = Instant::now();
                }
                window_target.set_control_flow(ControlFlow::WaitUntil(last_frame + frame_duration));
            }
            _ => {}
        })?;

        Ok(())
    }
}
