use rand::rngs::StdRng;
use rand::SeedableRng;

use tiled_canvas::{
    Color, FrameSurface, GridConfig, OccupancyMatrix, Offset, RecordingContext, Seed, TileIndex, TiledCanvas,
};

fn attach(tile_size: f64, width: u32, height: u32) -> TiledCanvas {
    TiledCanvas::attach(&(width, height), &GridConfig::with_tile_size(tile_size)).unwrap()
}

#[test]
fn twenty_pixel_tiles_on_400_square() {
    let canvas = attach(20.0, 400, 400);
    let grid = canvas.grid();
    assert_eq!((grid.rows(), grid.columns()), (20, 20));
    assert_eq!(grid.pixel_to_tile(10.0, 10.0), TileIndex::new(0, 0));

    // One past the drawn range, still inside the inclusive matrix
    let edge = grid.pixel_to_tile(405.0, 405.0);
    assert_eq!(edge, TileIndex::new(20, 20));
    assert!(!canvas.matrix().get(edge.row, edge.column));
    assert!(!canvas.matrix().get(21, 21));
}

#[test]
fn round_trip_holds_across_offsets() {
    for offset in [Offset::new(0.0, 0.0), Offset::new(13.0, -7.0), Offset::new(-40.0, 55.0)] {
        let mut canvas = attach(20.0, 400, 300);
        canvas.set_offset(offset);
        let grid = canvas.grid();
        for row in 0..=grid.rows() as i64 {
            for column in 0..=grid.columns() as i64 {
                let tile = grid.tile_to_pixel(row, column);
                assert_eq!(
                    grid.pixel_to_tile(tile.left as f64, tile.top as f64),
                    TileIndex::new(row, column),
                    "offset {:?}",
                    offset
                );
            }
        }
    }
}

#[test]
fn random_density_converges() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut matrix = OccupancyMatrix::new(20, 20);
    let trials = 200;
    let mut active = 0;
    for _ in 0..trials {
        matrix.initialize_with(Seed::Random(0.1), &mut rng);
        active += matrix.count_active();
    }

    let mean = active as f64 / trials as f64;
    // 21 x 21 cells at 10%
    assert!((mean - 44.1).abs() < 3.0, "mean active cells {}", mean);
}

#[test]
fn set_defaults_to_true_then_toggles() {
    let mut matrix = OccupancyMatrix::new(20, 20);
    assert!(matrix.activate(5, 5));
    assert!(matrix.get(5, 5));
    matrix.set(5, 5, false);
    assert!(!matrix.get(5, 5));
    assert_eq!(matrix.toggle(5, 5), Some(true));
    assert!(matrix.get(5, 5));
}

#[test]
fn shrinking_the_surface_shrinks_the_matrix() {
    let mut canvas = attach(20.0, 400, 400);
    canvas.seed(Seed::Random(1.0));
    assert!(canvas.matrix().get(15, 15));

    canvas.resize(200, 200);
    assert_eq!((canvas.grid().rows(), canvas.grid().columns()), (10, 10));
    assert_eq!((canvas.matrix().rows(), canvas.matrix().columns()), (10, 10));
    for index in [11, 15, 20] {
        assert!(!canvas.matrix().get(index, index));
        assert!(!canvas.matrix().get(0, index));
    }
}

#[test]
fn clicking_a_tile_renders_into_a_frame() {
    let (width, height) = (60u32, 40u32);
    let mut frame = vec![0u8; (width * height * 4) as usize];
    let mut surface = FrameSurface::new(&mut frame, width, height).unwrap();
    let mut canvas = TiledCanvas::attach(&surface, &GridConfig::with_tile_size(20.0)).unwrap();

    surface.clear(Color::WHITE);
    canvas.redraw(&mut surface);
    // Grid lines sit on the first pixel of every tile
    assert_eq!(surface.pixel(0, 10), Some(Color::LIGHT_GRAY.to_rgba()));
    assert_eq!(surface.pixel(10, 20), Some(Color::LIGHT_GRAY.to_rgba()));
    assert_eq!(surface.pixel(30, 30), Some(Color::WHITE.to_rgba()));

    let hit = canvas.toggle_at(30.0, 30.0).unwrap();
    assert_eq!((hit.tile.row, hit.tile.column), (1, 1));
    assert!(canvas.paint_tile(&mut surface, hit.tile.row, hit.tile.column));
    assert_eq!(surface.pixel(30, 30), Some(Color::LIGHT_GRAY.to_rgba()));
    assert_eq!(surface.pixel(21, 21), Some(Color::LIGHT_GRAY.to_rgba()));
    assert_eq!(surface.pixel(19, 30), Some(Color::WHITE.to_rgba()));

    canvas.toggle_at(30.0, 30.0);
    canvas.paint_tile(&mut surface, 1, 1);
    assert_eq!(surface.pixel(30, 30), Some(Color::WHITE.to_rgba()));
}

#[test]
fn zoom_scales_drawn_tiles() {
    let mut canvas = attach(10.0, 100, 100);
    canvas.set_zoom(2.0);
    canvas.matrix_mut().activate(1, 1);

    let mut ctx = RecordingContext::new();
    assert_eq!(canvas.draw_active(&mut ctx), 1);
    assert_eq!(ctx.fill_rects(), vec![(21.0, 21.0, 19.0, 19.0)]);

    // At 2x only half the lines fit on screen
    let mut ctx = RecordingContext::new();
    assert_eq!(canvas.draw(&mut ctx), 12);
}

#[test]
fn config_file_drives_attach() {
    let config = GridConfig::from_json_str(
        r#"{ "tile_size": 0, "zoom": -2, "fill_color": "red", "offset": { "top": 10, "left": 0 } }"#,
    )
    .unwrap();
    let canvas = TiledCanvas::attach(&(100u32, 100u32), &config).unwrap();
    assert_eq!(canvas.grid().tile_size(), 10.0);
    assert_eq!(canvas.grid().zoom(), 1.0);
    assert_eq!(canvas.settings().fill_color, Color::rgb(255, 0, 0));
    assert_eq!(canvas.grid().pixel_to_tile(0.0, 0.0), TileIndex::new(1, 0));
}

#[test]
fn bundled_config_loads() {
    let config = GridConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/tiled_canvas.json")).unwrap();
    let settings = config.validate();
    assert_eq!(settings.tile_size, 20.0);
    assert_eq!(settings.offset, Offset::default());
    assert_eq!(settings.background_color, Color::WHITE);
}
