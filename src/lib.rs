//! Uniform tile grids over a pixel surface: pixel/tile coordinate mapping
//! with pan and zoom, a per-tile occupancy matrix, and grid rendering
//! through a small 2D drawing-context trait.

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod matrix;
pub mod surface;

pub use canvas::{TileHit, TiledCanvas};
pub use color::Color;
pub use config::{GridConfig, GridSettings, Offset};
pub use error::{CanvasError, ConfigError, SurfaceError};
pub use grid::{Grid, Tile, TileIndex};
pub use matrix::{OccupancyMatrix, Seed};
pub use surface::{DrawCall, DrawContext, FrameSurface, RecordingContext, Segment, Surface};
