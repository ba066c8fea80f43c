//! Demo host: embeds the dial in a winit window and blits frames with
//! softbuffer.
//!
//! This binary plays the lifecycle owner's part and nothing more: construct
//! the face, `start()` on resume, `stop()` on suspend/close, forward size
//! changes, and present the current off-screen frame whenever the present
//! hook asks for a redraw.

use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use chromadial_engine::clock::{ClockFace, FaceConfig};
use chromadial_engine::logging::{init_logging, LoggingConfig};
use chromadial_engine::text::FontSystem;

struct Studio {
    face: ClockFace,
    window: Option<Arc<Window>>,
    surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,
    surface_size: (u32, u32),
}

impl Studio {
    fn new(face: ClockFace) -> Self {
        Self {
            face,
            window: None,
            surface: None,
            surface_size: (0, 0),
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("chromadial")
            .with_inner_size(LogicalSize::new(480.0, 480.0));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

        // The tick thread fires this after every completed frame.
        let redraw_target = window.clone();
        self.face.set_present_hook(move || redraw_target.request_redraw());

        let size = window.inner_size();
        self.window = Some(window);
        self.surface = Some(surface);
        self.resize(size.width, size.height);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.face.resize(width, height);
        let (Some(surface), Some(w), Some(h)) = (
            self.surface.as_mut(),
            NonZeroU32::new(width),
            NonZeroU32::new(height),
        ) else {
            return;
        };
        if let Err(e) = surface.resize(w, h) {
            log::error!("window surface resize failed: {e}");
            return;
        }
        self.surface_size = (width, height);
    }

    fn blit(&mut self) {
        let Some(window) = self.window.clone() else { return };
        let Some(surface) = self.surface.as_mut() else { return };
        let (dst_w, dst_h) = self.surface_size;
        if dst_w == 0 || dst_h == 0 {
            return;
        }

        let presented = self.face.with_frame(|frame| {
            let mut buffer = surface
                .buffer_mut()
                .map_err(|e| anyhow::anyhow!("buffer_mut: {e}"))?;
            buffer.fill(0x00ff_ffff);
            let w = frame.width().min(dst_w) as usize;
            let h = frame.height().min(dst_h) as usize;
            let src = frame.pixels();
            for y in 0..h {
                let src_row = &src[y * frame.width() as usize..][..w];
                let dst_row = &mut buffer[y * dst_w as usize..][..w];
                for (d, &s) in dst_row.iter_mut().zip(src_row) {
                    *d = over_white(s);
                }
            }
            buffer
                .present()
                .map_err(|e| anyhow::anyhow!("present: {e}"))?;
            Ok::<(), anyhow::Error>(())
        });

        match presented {
            // Draw in flight (or no frame yet): ask again instead of
            // reading a torn buffer.
            None => window.request_redraw(),
            Some(Err(e)) => log::error!("presentation failed: {e:#}"),
            Some(Ok(())) => {}
        }
    }
}

impl ApplicationHandler for Studio {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.open_window(event_loop) {
                log::error!("cannot open window: {e:#}");
                event_loop.exit();
                return;
            }
        }
        log::debug!("resuming");
        self.face.start();
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        log::debug!("pausing");
        self.face.stop();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.face.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.blit(),
            _ => {}
        }
    }
}

/// Composites one premultiplied ARGB8888 pixel over an opaque white
/// backdrop, yielding softbuffer's 0RGB format.
fn over_white(px: u32) -> u32 {
    let a = px >> 24;
    let r = (px >> 16) & 0xff;
    let g = (px >> 8) & 0xff;
    let b = px & 0xff;
    let k = 255 - a;
    ((r + k) << 16) | ((g + k) << 8) | (b + k)
}

/// Finds a usable system font for the numerals.
fn load_font() -> Option<FontSystem> {
    let bytes = [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok());

    let Some(bytes) = bytes else {
        log::warn!("no system font found; dial renders without numerals");
        return None;
    };
    match FontSystem::from_bytes(&bytes) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("system font unusable ({e}); dial renders without numerals");
            None
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let face = ClockFace::new(FaceConfig {
        font: load_font(),
        ..FaceConfig::default()
    });

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut studio = Studio::new(face);
    event_loop
        .run_app(&mut studio)
        .context("winit event loop terminated with error")?;
    Ok(())
}
