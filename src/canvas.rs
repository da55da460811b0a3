use rand::Rng;

use crate::color::Color;
use crate::config::{GridConfig, GridSettings, Offset};
use crate::error::CanvasError;
use crate::grid::{Grid, Tile};
use crate::matrix::{OccupancyMatrix, Seed};
use crate::surface::{DrawContext, Surface};

/// A tile under a pixel point together with its collision flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileHit {
    pub tile: Tile,
    pub collision: bool,
}

/// A grid and its occupancy matrix attached to one surface. Resizing goes
/// through here so the two never disagree on dimensions.
#[derive(Debug, Clone)]
pub struct TiledCanvas {
    settings: GridSettings,
    grid: Grid,
    matrix: OccupancyMatrix,
}

impl TiledCanvas {
    pub fn attach<S: Surface + ?Sized>(surface: &S, config: &GridConfig) -> Result<Self, CanvasError> {
        let (width, height) = (surface.width(), surface.height());
        if width == 0 || height == 0 {
            log::error!("refusing to attach a tile grid to a {}x{} surface", width, height);
            return Err(CanvasError::InvalidSurface { width, height });
        }

        let settings = config.validate();
        let mut grid = Grid::new(&settings);
        grid.set_size(width, height);
        let matrix = OccupancyMatrix::new(grid.rows(), grid.columns());

        Ok(Self { settings, grid, matrix })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn matrix(&self) -> &OccupancyMatrix {
        &self.matrix
    }

    pub fn matrix_mut(&mut self) -> &mut OccupancyMatrix {
        &mut self.matrix
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.grid.set_size(width, height);
        if self.grid.rows() != self.matrix.rows() || self.grid.columns() != self.matrix.columns() {
            self.matrix.resize(self.grid.rows(), self.grid.columns());
        }
    }

    pub fn set_offset(&mut self, offset: Offset) {
        self.grid.set_offset(offset);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.grid.set_zoom(zoom);
    }

    pub fn seed(&mut self, seed: Seed) {
        self.matrix.initialize(seed);
    }

    pub fn seed_with<R: Rng>(&mut self, seed: Seed, rng: &mut R) {
        self.matrix.initialize_with(seed, rng);
    }

    pub fn draw<C: DrawContext + ?Sized>(&self, ctx: &mut C) -> usize {
        self.grid.draw_lines(ctx)
    }

    pub fn draw_active<C: DrawContext + ?Sized>(&self, ctx: &mut C) -> usize {
        self.grid.draw_active(ctx, &self.matrix, self.settings.fill_color)
    }

    pub fn redraw<C: DrawContext + ?Sized>(&self, ctx: &mut C) {
        self.draw(ctx);
        self.draw_active(ctx);
    }

    pub fn check(&self, x: f64, y: f64) -> TileHit {
        let index = self.grid.pixel_to_tile(x, y);
        TileHit {
            tile: self.grid.tile_to_pixel(index.row, index.column),
            collision: self.matrix.get(index.row, index.column),
        }
    }

    /// Flips the tile under a point. Returns the hit with the new value, or
    /// `None` when the point is outside the matrix.
    pub fn toggle_at(&mut self, x: f64, y: f64) -> Option<TileHit> {
        let index = self.grid.pixel_to_tile(x, y);
        let collision = self.matrix.toggle(index.row, index.column)?;
        Some(TileHit {
            tile: self.grid.tile_to_pixel(index.row, index.column),
            collision,
        })
    }

    /// Repaints one tile in the fill color when active, the background
    /// color otherwise.
    pub fn paint_tile<C: DrawContext + ?Sized>(&self, ctx: &mut C, row: i64, column: i64) -> bool {
        let color = self.tile_color(self.matrix.get(row, column));
        self.grid.draw_tile(ctx, row, column, color)
    }

    fn tile_color(&self, active: bool) -> Color {
        if active {
            self.settings.fill_color
        } else {
            self.settings.background_color
        }
    }
}
