use std::ops::RangeInclusive;

use crate::color::Color;
use crate::config::{self, GridSettings, Offset};
use crate::matrix::OccupancyMatrix;
use crate::surface::DrawContext;

/// Row/column address of a tile. Points above or left of the origin map
/// to negative indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub row: i64,
    pub column: i64,
}

impl TileIndex {
    pub fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }
}

/// Screen rectangle of one tile, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub row: i64,
    pub column: i64,
    pub left: i64,
    pub top: i64,
    pub size: i64,
}

impl Tile {
    pub fn index(&self) -> TileIndex {
        TileIndex::new(self.row, self.column)
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    tile_size: f64,
    rows: u32,
    columns: u32,
    offset: Offset,
    zoom: f64,
    width: u32,
    height: u32,
    line_color: Color,
}

impl Grid {
    /// Creates a grid with no rows or columns; call `set_size` before use.
    pub fn new(settings: &GridSettings) -> Self {
        // Settings can be built by hand, so the numeric bounds are rechecked
        let tile_size = config::validate_tile_size(settings.tile_size);
        Self {
            tile_size,
            rows: 0,
            columns: 0,
            offset: settings.offset.sanitized(),
            zoom: config::validate_zoom(settings.zoom, tile_size),
            width: 0,
            height: 0,
            line_color: settings.line_color,
        }
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.rows = (height as f64 / self.tile_size).floor() as u32;
        self.columns = (width as f64 / self.tile_size).floor() as u32;
        log::debug!(
            "grid resized to {}x{}: {} rows, {} columns",
            width,
            height,
            self.rows,
            self.columns
        );
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_offset(&mut self, offset: Offset) {
        self.offset = offset.sanitized();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = config::validate_zoom(zoom, self.tile_size);
    }

    /// Inclusive bounds test against the current rows/columns.
    pub fn contains(&self, index: TileIndex) -> bool {
        (0..=self.rows as i64).contains(&index.row) && (0..=self.columns as i64).contains(&index.column)
    }

    /// Tile under a pixel point. Not bounds checked. The point is scaled
    /// back by the zoom first, so this inverts `tile_to_pixel` at any zoom.
    pub fn pixel_to_tile(&self, x: f64, y: f64) -> TileIndex {
        TileIndex {
            row: ((y / self.zoom + self.offset.top) / self.tile_size).floor() as i64,
            column: ((x / self.zoom + self.offset.left) / self.tile_size).floor() as i64,
        }
    }

    pub fn tile_to_pixel(&self, row: i64, column: i64) -> Tile {
        Tile {
            row,
            column,
            left: self.line_position(column, self.offset.left) as i64,
            top: self.line_position(row, self.offset.top) as i64,
            size: (self.tile_size * self.zoom).ceil() as i64,
        }
    }

    fn line_position(&self, index: i64, offset: f64) -> f64 {
        ((index as f64 * self.tile_size - offset) * self.zoom).ceil()
    }

    /// Line indices that land on screen for an axis with the given pan and
    /// pixel extent.
    fn visible_lines(&self, offset: f64, extent: u32) -> RangeInclusive<i64> {
        let first = (offset / self.tile_size).ceil() as i64;
        let last = ((extent as f64 / self.zoom + offset) / self.tile_size).floor() as i64;
        first..=last
    }

    /// Strokes the visible grid lines. Returns the number of segments drawn.
    pub fn draw_lines<C: DrawContext + ?Sized>(&self, ctx: &mut C) -> usize {
        ctx.set_line_width(1.0);
        ctx.set_stroke_color(self.line_color);

        let width = self.width as f64;
        let height = self.height as f64;
        let mut drawn = 0;

        for row in self.visible_lines(self.offset.top, self.height) {
            let y = self.line_position(row, self.offset.top) + 0.5;
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(width, y);
            ctx.stroke();
            drawn += 1;
        }

        for column in self.visible_lines(self.offset.left, self.width) {
            let x = self.line_position(column, self.offset.left) + 0.5;
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, height);
            ctx.stroke();
            drawn += 1;
        }

        drawn
    }

    /// Fills one tile inside its grid lines. Tiles entirely off screen are
    /// skipped; returns whether anything was drawn.
    pub fn draw_tile<C: DrawContext + ?Sized>(&self, ctx: &mut C, row: i64, column: i64, color: Color) -> bool {
        let tile = self.tile_to_pixel(row, column);
        let (width, height) = (self.width as i64, self.height as i64);
        // Far-off tiles saturate at the i64 limits
        if tile.left.saturating_add(tile.size) < 0
            || tile.left > width
            || tile.top.saturating_add(tile.size) < 0
            || tile.top > height
        {
            return false;
        }

        let inner = (tile.size - 1) as f64;
        ctx.set_fill_color(color);
        ctx.fill_rect((tile.left + 1) as f64, (tile.top + 1) as f64, inner, inner);
        true
    }

    /// Fills every active cell of `matrix`. Returns the number of tiles drawn.
    pub fn draw_active<C: DrawContext + ?Sized>(&self, ctx: &mut C, matrix: &OccupancyMatrix, color: Color) -> usize {
        let mut drawn = 0;
        for index in matrix.active_cells() {
            if self.draw_tile(ctx, index.row, index.column, color) {
                drawn += 1;
            }
        }
        drawn
    }
}
