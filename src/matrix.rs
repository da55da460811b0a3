use rand::Rng;

use crate::grid::TileIndex;

/// Density used when a random seed carries no usable probability.
pub const DEFAULT_DENSITY: f64 = 0.3;

/// Initial contents for an occupancy matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed {
    Empty,
    /// Each cell is independently active with this probability.
    Random(f64),
    /// Caller-provided state, indexed `[row][column]`.
    Map(Vec<Vec<bool>>),
}

/// One collision flag per tile, `(rows + 1) x (columns + 1)` cells so that
/// the partial row/column at the surface edge is addressable too.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyMatrix {
    rows: u32,
    columns: u32,
    cells: Vec<Vec<bool>>,
}

impl OccupancyMatrix {
    pub fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            cells: Self::allocate(rows, columns),
        }
    }

    fn allocate(rows: u32, columns: u32) -> Vec<Vec<bool>> {
        vec![vec![false; columns as usize + 1]; rows as usize + 1]
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// The whole matrix, indexed `[row][column]`.
    pub fn cells(&self) -> &[Vec<bool>] {
        &self.cells
    }

    pub fn initialize(&mut self, seed: Seed) {
        self.initialize_with(seed, &mut rand::thread_rng());
    }

    pub fn initialize_with<R: Rng>(&mut self, seed: Seed, rng: &mut R) {
        match seed {
            Seed::Empty => self.cells = Self::allocate(self.rows, self.columns),
            Seed::Random(probability) => {
                let p = if probability.is_nan() {
                    log::warn!("seed probability is NaN, using {}", DEFAULT_DENSITY);
                    DEFAULT_DENSITY
                } else {
                    probability.clamp(0.0, 1.0)
                };
                for row in self.cells.iter_mut() {
                    for cell in row.iter_mut() {
                        *cell = rng.gen_bool(p);
                    }
                }
            }
            Seed::Map(map) => {
                let mut cells = Self::allocate(self.rows, self.columns);
                for (target, source) in cells.iter_mut().zip(map.iter()) {
                    for (cell, value) in target.iter_mut().zip(source.iter()) {
                        *cell = *value;
                    }
                }
                self.cells = cells;
            }
        }
        log::debug!(
            "occupancy matrix initialized: {} of {} cells active",
            self.count_active(),
            (self.rows as usize + 1) * (self.columns as usize + 1)
        );
    }

    fn slot(&self, row: i64, column: i64) -> Option<(usize, usize)> {
        if row < 0 || column < 0 || row > self.rows as i64 || column > self.columns as i64 {
            return None;
        }
        Some((row as usize, column as usize))
    }

    pub fn contains(&self, row: i64, column: i64) -> bool {
        self.slot(row, column).is_some()
    }

    /// Value at `[row][column]`; false outside the matrix.
    pub fn get(&self, row: i64, column: i64) -> bool {
        self.slot(row, column)
            .map(|(r, c)| self.cells[r][c])
            .unwrap_or(false)
    }

    /// Writes `value` if in bounds. Returns whether the write happened.
    pub fn set(&mut self, row: i64, column: i64, value: bool) -> bool {
        match self.slot(row, column) {
            Some((r, c)) => {
                self.cells[r][c] = value;
                true
            }
            None => false,
        }
    }

    pub fn activate(&mut self, row: i64, column: i64) -> bool {
        self.set(row, column, true)
    }

    /// Flips a cell and returns its new value, or `None` outside the matrix.
    pub fn toggle(&mut self, row: i64, column: i64) -> Option<bool> {
        let (r, c) = self.slot(row, column)?;
        self.cells[r][c] = !self.cells[r][c];
        Some(self.cells[r][c])
    }

    /// Reallocates for new grid dimensions. Existing state is dropped.
    pub fn resize(&mut self, rows: u32, columns: u32) {
        self.rows = rows;
        self.columns = columns;
        self.cells = Self::allocate(rows, columns);
    }

    pub fn active_cells(&self) -> impl Iterator<Item = TileIndex> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, active)| **active)
                .map(move |(column, _)| TileIndex::new(row as i64, column as i64))
        })
    }

    pub fn count_active(&self) -> usize {
        self.cells.iter().flatten().filter(|active| **active).count()
    }
}
