use crate::color::Color;
use crate::error::SurfaceError;

/// Anything with a pixel extent a grid can be laid over.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

impl Surface for (u32, u32) {
    fn width(&self) -> u32 {
        self.0
    }

    fn height(&self) -> u32 {
        self.1
    }
}

/// The subset of a 2D canvas context the grid draws with.
pub trait DrawContext {
    fn set_line_width(&mut self, width: f64);
    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Path state shared by the contexts below: `line_to` without a current
/// point behaves like `move_to`, as on a canvas.
#[derive(Debug, Default, Clone)]
struct Path {
    current: Option<(f64, f64)>,
    segments: Vec<Segment>,
}

impl Path {
    fn begin(&mut self) {
        self.current = None;
        self.segments.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.current = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if let Some(from) = self.current {
            self.segments.push(Segment { from, to: (x, y) });
        }
        self.current = Some((x, y));
    }
}

/// RGBA frame buffer drawn into in place, e.g. `pixels::Pixels::frame_mut()`.
pub struct FrameSurface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    line_width: f64,
    stroke_color: Color,
    fill_color: Color,
    path: Path,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Result<Self, SurfaceError> {
        let expected = width as usize * height as usize * 4;
        if frame.len() != expected {
            return Err(SurfaceError::BufferSize {
                expected,
                actual: frame.len(),
            });
        }

        Ok(Self {
            frame,
            width,
            height,
            line_width: 1.0,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            path: Path::default(),
        })
    }

    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = ((y * self.width + x) * 4) as usize;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.frame[index..index + 4]);
        Some(rgba)
    }

    fn put_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let index = ((y as usize * self.width as usize) + x as usize) * 4;
        self.frame[index..index + 4].copy_from_slice(&rgba);
    }

    fn fill_block(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, rgba: [u8; 4]) {
        // Clip to the frame first so huge rects stay cheap
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.width as i64);
        let y1 = y1.min(self.height as i64);
        for y in y0..y1 {
            for x in x0..x1 {
                self.put_pixel(x, y, rgba);
            }
        }
    }

    fn stroke_segment(&mut self, segment: Segment, thickness: i64, rgba: [u8; 4]) {
        let (x0, y0) = segment.from;
        let (x1, y1) = segment.to;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let steps = dx.abs().max(dy.abs()).ceil() as i64;
        let half = self.line_width / 2.0;

        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
            let px = (x0 + dx * t - half).floor() as i64;
            let py = (y0 + dy * t - half).floor() as i64;
            self.fill_block(px, py, px + thickness, py + thickness, rgba);
        }
    }
}

impl Surface for FrameSurface<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl DrawContext for FrameSurface<'_> {
    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn begin_path(&mut self) {
        self.path.begin();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to(x, y);
    }

    fn stroke(&mut self) {
        let thickness = (self.line_width.round() as i64).max(1);
        let rgba = self.stroke_color.to_rgba();
        let segments = std::mem::take(&mut self.path.segments);
        for segment in &segments {
            self.stroke_segment(*segment, thickness, rgba);
        }
        // The path survives a stroke until the next begin_path
        self.path.segments = segments;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (left, right) = if width < 0.0 { (x + width, x) } else { (x, x + width) };
        let (top, bottom) = if height < 0.0 { (y + height, y) } else { (y, y + height) };
        let rgba = self.fill_color.to_rgba();
        self.fill_block(
            left.floor() as i64,
            top.floor() as i64,
            right.floor() as i64,
            bottom.floor() as i64,
            rgba,
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    LineWidth(f64),
    StrokeColor(Color),
    FillColor(Color),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke,
    FillRect { x: f64, y: f64, width: f64, height: f64 },
}

/// Records draw calls instead of rasterizing them.
#[derive(Debug, Default)]
pub struct RecordingContext {
    calls: Vec<DrawCall>,
    path: Path,
    stroked: Vec<Segment>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Every segment that reached a `stroke`, in order.
    pub fn stroked_segments(&self) -> &[Segment] {
        &self.stroked
    }

    pub fn fill_rects(&self) -> Vec<(f64, f64, f64, f64)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                DrawCall::FillRect { x, y, width, height } => Some((x, y, width, height)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.path.begin();
        self.stroked.clear();
    }
}

impl DrawContext for RecordingContext {
    fn set_line_width(&mut self, width: f64) {
        self.calls.push(DrawCall::LineWidth(width));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.calls.push(DrawCall::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.calls.push(DrawCall::FillColor(color));
    }

    fn begin_path(&mut self) {
        self.path.begin();
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to(x, y);
        self.calls.push(DrawCall::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to(x, y);
        self.calls.push(DrawCall::LineTo(x, y));
    }

    fn stroke(&mut self) {
        self.stroked.extend_from_slice(&self.path.segments);
        self.calls.push(DrawCall::Stroke);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::FillRect { x, y, width, height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn rejects_mismatched_buffer() {
        let mut frame = vec![0u8; 10];
        let err = FrameSurface::new(&mut frame, 4, 4).err().unwrap();
        assert!(matches!(err, SurfaceError::BufferSize { expected: 64, actual: 10 }));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut frame = vec![0u8; 8 * 8 * 4];
        let mut surface = FrameSurface::new(&mut frame, 8, 8).unwrap();
        surface.set_fill_color(RED);
        surface.fill_rect(6.0, 6.0, 10.0, 10.0);

        assert_eq!(surface.pixel(7, 7), Some(RED.to_rgba()));
        assert_eq!(surface.pixel(5, 5), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(8, 8), None);
    }

    #[test]
    fn crisp_horizontal_line_covers_one_row() {
        let mut frame = vec![0u8; 10 * 10 * 4];
        let mut surface = FrameSurface::new(&mut frame, 10, 10).unwrap();
        surface.clear(Color::WHITE);
        surface.set_line_width(1.0);
        surface.set_stroke_color(RED);
        surface.begin_path();
        surface.move_to(0.0, 3.5);
        surface.line_to(10.0, 3.5);
        surface.stroke();

        for x in 0..10 {
            assert_eq!(surface.pixel(x, 3), Some(RED.to_rgba()));
            assert_eq!(surface.pixel(x, 2), Some(Color::WHITE.to_rgba()));
            assert_eq!(surface.pixel(x, 4), Some(Color::WHITE.to_rgba()));
        }
    }

    #[test]
    fn begin_path_discards_previous_segments() {
        let mut frame = vec![0u8; 10 * 10 * 4];
        let mut surface = FrameSurface::new(&mut frame, 10, 10).unwrap();
        surface.set_stroke_color(RED);
        surface.begin_path();
        surface.move_to(1.5, 0.0);
        surface.line_to(1.5, 10.0);
        surface.begin_path();
        surface.move_to(5.5, 0.0);
        surface.line_to(5.5, 10.0);
        surface.stroke();

        assert_eq!(surface.pixel(1, 5), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(5, 5), Some(RED.to_rgba()));
    }

    #[test]
    fn recording_tracks_stroked_segments() {
        let mut ctx = RecordingContext::new();
        ctx.begin_path();
        ctx.line_to(1.0, 1.0);
        ctx.line_to(2.0, 1.0);
        ctx.stroke();
        ctx.fill_rect(1.0, 2.0, 3.0, 4.0);

        assert_eq!(
            ctx.stroked_segments(),
            &[Segment { from: (1.0, 1.0), to: (2.0, 1.0) }]
        );
        assert_eq!(ctx.fill_rects(), vec![(1.0, 2.0, 3.0, 4.0)]);

        ctx.clear();
        assert!(ctx.calls().is_empty());
    }
}
