use crate::inventory::OffcutInventory;
use crate::types::*;
use tracing::debug;

mod layout;
mod orientation;
mod summary;

pub use orientation::select_orientation;

/// Covers walls with standard panels using grid tiling plus offcut reuse.
pub struct Optimizer {
    request: OptimizationRequest,
}

impl Optimizer {
    /// Validates requests and builds a new optimizer instance.
    pub fn new(request: OptimizationRequest) -> Result<Self> {
        if request.walls.is_empty() {
            return Err(OptimizerError::InvalidInput(
                "At least one wall must be provided".to_string(),
            ));
        }

        ensure_positive("Panel", request.panel.width, request.panel.height)?;

        if let Some(side) = request.min_offcut_side {
            if !(side > 0.0 && side.is_finite()) {
                return Err(OptimizerError::InvalidInput(format!(
                    "Minimum offcut side must be positive, got {side}"
                )));
            }
        }

        for wall in &request.walls {
            validate_wall_dimensions(wall, &wall.openings)?;
        }

        Ok(Self { request })
    }

    pub fn request(&self) -> &OptimizationRequest {
        &self.request
    }

    /// Runs every wall in order against a fresh offcut pool.
    pub fn optimize(&self) -> Result<OptimizationReport> {
        let mut inventory = OffcutInventory::new();
        self.optimize_with_inventory(&mut inventory)
    }

    /// Runs every wall in order, drawing on and feeding `inventory`.
    ///
    /// Offcuts left by wall N are available to wall N+1. Passing the same
    /// inventory to several runs carries leftovers across them.
    pub fn optimize_with_inventory(
        &self,
        inventory: &mut OffcutInventory,
    ) -> Result<OptimizationReport> {
        let mut results = Vec::with_capacity(self.request.walls.len());
        for wall in &self.request.walls {
            results.push(self.optimize_wall(wall, &wall.openings, inventory)?);
        }

        let report = self.build_report(results, inventory);
        debug!(
            walls = report.walls.len(),
            new_panels = report.new_panels,
            offcuts_consumed = report.offcuts_consumed,
            waste_percentage = report.waste_percentage,
            "optimization complete"
        );

        Ok(report)
    }

    /// Places panels on a single wall: orientation, grid tiling, offcut reuse.
    pub fn optimize_wall(
        &self,
        wall: &Wall,
        openings: &[Opening],
        inventory: &mut OffcutInventory,
    ) -> Result<WallPlacementResult> {
        validate_wall_dimensions(wall, openings)?;

        let config = select_orientation(wall.width, wall.height, self.request.panel);
        let (placements, offcuts_generated) =
            self.place_panels(wall, openings, &config, inventory);

        let new_panels = placements.iter().filter(|p| !p.from_offcut()).count() as u32;
        let offcuts_consumed = placements.len() as u32 - new_panels;
        let useful_area = wall.area() - openings.iter().map(Opening::area).sum::<f64>();

        debug!(
            wall = %wall.id,
            orientation = ?config.orientation,
            tiles_x = config.tiles_x,
            tiles_y = config.tiles_y,
            placements = placements.len(),
            new_panels,
            offcuts_consumed,
            offcuts_generated,
            "wall placed"
        );

        Ok(WallPlacementResult {
            wall_id: wall.id.clone(),
            orientation: config,
            placements,
            new_panels,
            offcuts_consumed,
            offcuts_generated,
            useful_area,
        })
    }

    fn min_offcut_side(&self) -> f64 {
        self.request
            .min_offcut_side
            .unwrap_or(DEFAULT_MIN_OFFCUT_SIDE)
    }
}

fn ensure_positive(what: &str, width: f64, height: f64) -> Result<()> {
    let valid = |v: f64| v > 0.0 && v.is_finite();
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(OptimizerError::InvalidInput(format!(
            "{what} must have a positive width and height, got {width} x {height}"
        )))
    }
}

fn validate_wall_dimensions(wall: &Wall, openings: &[Opening]) -> Result<()> {
    ensure_positive(&format!("Wall '{}'", wall.id), wall.width, wall.height)?;
    for opening in openings {
        ensure_positive(
            &format!("Opening '{}' of wall '{}'", opening.id, wall.id),
            opening.width,
            opening.height,
        )?;
    }
    Ok(())
}
