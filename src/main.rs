mod input;
mod renderer;

use std::env;

use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use tiled_canvas::{GridConfig, Offset, Seed, TiledCanvas};

use crate::input::{InputAction, InputHandler};
use crate::renderer::Renderer;

const WIDTH: u32 = 500;
const HEIGHT: u32 = 500;
const DEMO_TILE_SIZE: f64 = 20.0;
const ZOOM_STEP: f64 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Demo {
    /// Click a tile to toggle it.
    Clickable,
    /// A random field, reseeded with `R`.
    Random,
}

impl Demo {
    fn from_arg(arg: Option<&str>) -> Option<Self> {
        match arg {
            None | Some("clickable") => Some(Demo::Clickable),
            Some("random") => Some(Demo::Random),
            Some(_) => None,
        }
    }

    fn density(self) -> f64 {
        match self {
            Demo::Clickable => 0.1,
            Demo::Random => 0.3,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let demo = match Demo::from_arg(args.first().map(String::as_str)) {
        Some(demo) => demo,
        None => {
            eprintln!("usage: tiled_canvas [clickable|random] [config.json]");
            std::process::exit(2);
        }
    };
    let config = match args.get(1) {
        Some(path) => GridConfig::load(path)?,
        None => GridConfig::with_tile_size(DEMO_TILE_SIZE),
    };

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Tiled Canvas")
        .with_inner_size(LogicalSize::new(WIDTH, HEIGHT))
        .with_resizable(true)
        .build(&event_loop)?;

    let mut renderer = Renderer::new(&window)?;
    let mut canvas = TiledCanvas::attach(&renderer, &config)?;
    canvas.seed(Seed::Random(demo.density()));
    log::info!(
        "{:?} demo: {} rows x {} columns of {}px tiles",
        demo,
        canvas.grid().rows(),
        canvas.grid().columns(),
        canvas.grid().tile_size()
    );

    let mut input = InputHandler::new();
    let mut redraw_requested = true;
    let mut present_requested = false;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => {
                let action = match event {
                    WindowEvent::CloseRequested => InputAction::Exit,
                    WindowEvent::Resized(size) => {
                        if renderer.resize(size.width, size.height) {
                            canvas.resize(size.width, size.height);
                            canvas.seed(Seed::Random(demo.density()));
                            redraw_requested = true;
                        }
                        InputAction::None
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input.handle_cursor_moved(position.x, position.y);
                        InputAction::None
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input.handle_cursor_left();
                        InputAction::None
                    }
                    WindowEvent::MouseInput { state, button, .. } => input.handle_mouse_input(state, button),
                    WindowEvent::KeyboardInput { input: key, .. } => input.handle_keyboard_input(&key),
                    _ => InputAction::None,
                };

                match action {
                    InputAction::Exit => *control_flow = ControlFlow::Exit,
                    InputAction::Click { x, y } if demo == Demo::Clickable => {
                        let Some((x, y)) = renderer.window_to_surface(x, y) else {
                            return;
                        };
                        if let Some(hit) = canvas.toggle_at(x, y) {
                            log::debug!(
                                "tile ({}, {}) -> {}",
                                hit.tile.row,
                                hit.tile.column,
                                hit.collision
                            );
                            match renderer.paint_tile(&canvas, hit.tile.row, hit.tile.column) {
                                Ok(drawn) => present_requested |= drawn,
                                Err(err) => log::error!("Paint error: {}", err),
                            }
                        }
                    }
                    InputAction::Pan { columns, rows } => {
                        let offset = canvas.grid().offset();
                        let step = canvas.grid().tile_size();
                        canvas.set_offset(Offset::new(
                            offset.top + rows as f64 * step,
                            offset.left + columns as f64 * step,
                        ));
                        redraw_requested = true;
                    }
                    InputAction::ZoomIn => {
                        canvas.set_zoom(canvas.grid().zoom() * ZOOM_STEP);
                        redraw_requested = true;
                    }
                    InputAction::ZoomOut => {
                        canvas.set_zoom(canvas.grid().zoom() / ZOOM_STEP);
                        redraw_requested = true;
                    }
                    InputAction::ResetView => {
                        let settings = *canvas.settings();
                        canvas.set_offset(settings.offset);
                        canvas.set_zoom(settings.zoom);
                        redraw_requested = true;
                    }
                    InputAction::Reseed => {
                        canvas.seed(Seed::Random(demo.density()));
                        redraw_requested = true;
                    }
                    _ => {}
                }
            }
            Event::MainEventsCleared => {
                if redraw_requested {
                    if let Err(err) = renderer.render(&canvas) {
                        log::error!("Render error: {}", err);
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    redraw_requested = false;
                    present_requested = true;
                }

                if present_requested {
                    if let Err(err) = renderer.present() {
                        log::error!("Present error: {}", err);
                        *control_flow = ControlFlow::Exit;
                    }
                    present_requested = false;
                }
            }
            _ => {}
        }
    });
}
