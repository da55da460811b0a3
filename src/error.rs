use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Invalid surface: {width}x{height} cannot hold a tile grid")]
    InvalidSurface { width: u32, height: u32 },
}

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Frame buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
