use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::window::Window;

use tiled_canvas::{FrameSurface, Surface, SurfaceError, TiledCanvas};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Pixels error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Owns the window's frame buffer and draws a tiled canvas into it.
pub struct Renderer {
    pixels: Pixels,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: &Window) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;

        Ok(Self {
            pixels,
            width: size.width,
            height: size.height,
        })
    }

    /// Resizes surface and buffer to the window. Returns false while the
    /// window has no area (minimized), leaving the old buffer in place.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;

        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
        if let Err(err) = self.pixels.resize_buffer(width, height) {
            log::error!("Failed to resize buffer: {}", err);
        }
        true
    }

    fn frame(&mut self) -> Result<FrameSurface<'_>, SurfaceError> {
        FrameSurface::new(self.pixels.frame_mut(), self.width, self.height)
    }

    pub fn render(&mut self, canvas: &TiledCanvas) -> Result<(), RenderError> {
        let background = canvas.settings().background_color;
        let mut frame = self.frame()?;
        frame.clear(background);
        canvas.redraw(&mut frame);
        Ok(())
    }

    pub fn paint_tile(&mut self, canvas: &TiledCanvas, row: i64, column: i64) -> Result<bool, RenderError> {
        let mut frame = self.frame()?;
        Ok(canvas.paint_tile(&mut frame, row, column))
    }

    /// Maps a window position to buffer coordinates; `None` outside the buffer.
    pub fn window_to_surface(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        self.pixels
            .window_pos_to_pixel((x as f32, y as f32))
            .ok()
            .map(|(px, py)| (px as f64, py as f64))
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}

impl Surface for Renderer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
