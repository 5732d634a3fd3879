//! Board Demo
//!
//! Run with: `cargo run --bin board_demo [config.json]`
//!
//! Headless walkthrough of the engine:
//! - builds a board from a JSON `GridConfig` (or the defaults)
//! - walls off one column except its last row and finds a path around it
//! - clicks a cell through the picker using synthesized winit pointer input
//! - taps another cell with a synthesized touch
//! - prints the board snapshot as JSON
//!
//! Set `RUST_LOG=debug` to see generation and search logging.

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use glam::Vec3;
use tilegrid::input::WinitPointer;
use tilegrid::picking::{PickCamera, PickGroup, Picker, PickerEvent, PickerEventKind, StructureRef};
use tilegrid::{CellCoord, Grid, GridConfig, PathRequest, PathResult, Pathfinder};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, TouchPhase};

const VIEWPORT_WIDTH: u32 = 1280;
const VIEWPORT_HEIGHT: u32 = 720;

fn load_config() -> Result<GridConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("loading grid config from {path}");
            Ok(GridConfig::from_json_str(&json)?)
        }
        None => Ok(GridConfig::hex(10.0, 4)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    println!("=== Tile Board Demo ===");

    let config = load_config()?;
    let mut grid: Grid<&str> = Grid::generated(config)?;
    let n = grid.size();
    println!(
        "{:?} board: size {}, cell size {}, {} cells",
        grid.shape(),
        n,
        grid.cell_size(),
        grid.len()
    );

    // ------------------------------------------------------------------------
    // Pathfinding around a wall
    // ------------------------------------------------------------------------
    let wall: Vec<CellCoord> = grid
        .cells()
        .map(|cell| cell.coord())
        .filter(|c| c.q == 0 && c.r < n)
        .collect();
    for &coord in &wall {
        grid.set_walkable(coord, false);
    }
    println!("walled {} cells on column q = 0", wall.len());

    let start = CellCoord::flat(-n, n / 2);
    let goal = CellCoord::flat(n, -n / 2);
    let mut finder = Pathfinder::new();
    match finder.find_path(&grid, start, goal, &PathRequest::new()) {
        PathResult::Found(path) => {
            println!(
                "path {} -> {}: {} steps, cost {}, {} nodes expanded",
                start,
                goal,
                path.steps(),
                path.cost,
                path.expanded
            );
            let cells: Vec<String> = path.cells.iter().map(ToString::to_string).collect();
            println!("  {}", cells.join(" -> "));
        }
        PathResult::NoPath { expanded } => {
            println!("no path {start} -> {goal} ({expanded} nodes expanded)");
        }
        PathResult::ExpansionLimit { expanded } => {
            println!("search {start} -> {goal} stopped after {expanded} nodes");
        }
    }

    // ------------------------------------------------------------------------
    // Picking
    // ------------------------------------------------------------------------
    let target = CellCoord::flat(1, 0);
    grid.place_tile(target, "banner");

    let viewport = PhysicalSize::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    let camera = PickCamera::looking_at(Vec3::new(0.0, 150.0, 90.0), Vec3::ZERO)
        .with_aspect(VIEWPORT_WIDTH as f32 / VIEWPORT_HEIGHT as f32);
    let scene = PickGroup::from_grid(&grid);

    let mut picker: Picker<StructureRef> = Picker::new();
    let clicked: Rc<RefCell<Option<StructureRef>>> = Rc::new(RefCell::new(None));
    {
        let clicked = Rc::clone(&clicked);
        picker.on(PickerEventKind::Click, move |event| {
            if let PickerEvent::Click(structure) = event {
                *clicked.borrow_mut() = Some(*structure);
            }
        })?;
    }
    picker.on(PickerEventKind::Over, |event| {
        if let PickerEvent::Over(structure) = event {
            println!("  over {structure:?}");
        }
    })?;

    // Screen position of a cell's top face
    let height = grid.config().extrude_settings.amount;
    let screen_over = |coord: CellCoord| {
        let ndc = camera
            .view_projection()
            .project_point3(grid.cell_to_pixel(coord) + Vec3::Y * height);
        PhysicalPosition::new(
            ((ndc.x + 1.0) * 0.5 * VIEWPORT_WIDTH as f32) as f64,
            ((1.0 - ndc.y) * 0.5 * VIEWPORT_HEIGHT as f32) as f64,
        )
    };

    let mut pointer = WinitPointer::new(viewport);
    picker.handle_input(pointer.cursor_moved(screen_over(target)));
    picker.update(&scene, &camera);
    picker.handle_input(pointer.mouse_input(ElementState::Pressed, MouseButton::Left));
    picker.update(&scene, &camera);
    picker.handle_input(pointer.mouse_input(ElementState::Released, MouseButton::Left));

    match *clicked.borrow() {
        Some(structure) => {
            let tile = grid.tile_at(structure.coord()).map(|t| t.data);
            println!("clicked {structure:?} (tile: {tile:?})");
        }
        None => println!("click did not land on a structure"),
    }

    // A touch tap: the press is held back until the touched cell is resolved
    let tapped = CellCoord::flat(-1, 1);
    let location = screen_over(tapped);
    let mut inputs = pointer.touch(TouchPhase::Started, location);
    inputs.extend(pointer.touch(TouchPhase::Ended, location));
    for input in inputs {
        picker.handle_input(input);
    }
    picker.update(&scene, &camera);
    for input in pointer.take_deferred() {
        picker.handle_input(input);
    }
    match *clicked.borrow() {
        Some(structure) if structure.coord() == tapped => println!("tapped {structure:?}"),
        _ => println!("tap did not land on {tapped}"),
    }
    if let Some(point) = picker.pointer_on_plane(&camera, 0.0) {
        println!("pointer on ground at ({:.2}, {:.2}, {:.2})", point.x, point.y, point.z);
    }
    picker.dispose();

    // ------------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------------
    println!("{}", grid.to_json_pretty()?);
    Ok(())
}
