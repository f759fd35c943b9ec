//! Wall panel placement engine.
//!
//! Covers rectangular walls with standard-size panels around openings
//! (doors, windows, sockets, pipes), keeping the number of fresh panels low by
//! reusing offcuts left over from earlier cuts. Coordinates are centimeters
//! with the origin at the bottom-left corner of each wall.

pub mod geometry;
pub mod inventory;
pub mod optimizer;
pub mod types;

pub use geometry::{
    opening_out_of_bounds, openings_overlap, rectangles_overlap, validate_wall, Rect, WallIssue,
};
pub use inventory::{identify_offcuts, OffcutCandidate, OffcutInventory};
pub use optimizer::{select_orientation, Optimizer};
pub use types::*;

/// Optimizes a whole project in one run, with a fresh offcut pool.
pub fn optimize_all_walls(
    walls: Vec<Wall>,
    panel: PanelDimensions,
    use_offcuts: bool,
) -> Result<OptimizationReport> {
    let request = OptimizationRequest {
        use_offcuts,
        ..OptimizationRequest::new(panel, walls)
    };
    Optimizer::new(request)?.optimize()
}

/// Places panels on one wall against a fresh offcut pool.
///
/// `openings` replaces the wall's own opening list.
pub fn optimize_wall(
    wall: &Wall,
    panel: PanelDimensions,
    openings: &[Opening],
    use_offcuts: bool,
) -> Result<WallPlacementResult> {
    let wall = Wall {
        openings: openings.to_vec(),
        ..wall.clone()
    };
    let request = OptimizationRequest {
        use_offcuts,
        ..OptimizationRequest::new(panel, vec![wall])
    };
    let optimizer = Optimizer::new(request)?;
    let wall = &optimizer.request().walls[0];
    optimizer.optimize_wall(wall, &wall.openings, &mut OffcutInventory::new())
}
