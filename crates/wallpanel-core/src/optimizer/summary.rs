use super::*;

impl Optimizer {
    /// Merges per-wall results into the project report.
    pub(super) fn build_report(
        &self,
        results: Vec<WallPlacementResult>,
        inventory: &OffcutInventory,
    ) -> OptimizationReport {
        let walls: Vec<WallSummary> = self
            .request
            .walls
            .iter()
            .zip(&results)
            .map(|(wall, result)| WallSummary {
                wall_id: wall.id.clone(),
                name: wall.name.clone(),
                width: wall.width,
                height: wall.height,
                openings: wall.openings.len(),
                orientation: result.orientation.orientation,
                new_panels: result.new_panels,
                offcuts_consumed: result.offcuts_consumed,
                offcuts_generated: result.offcuts_generated,
                useful_area: result.useful_area,
            })
            .collect();

        let new_panels: u32 = results.iter().map(|r| r.new_panels).sum();
        let offcuts_consumed: u32 = results.iter().map(|r| r.offcuts_consumed).sum();
        let useful_area: f64 = results.iter().map(|r| r.useful_area).sum();
        let standard_panel_area = f64::from(new_panels) * self.request.panel.area();

        let waste_percentage = if standard_panel_area > 0.0 {
            ((standard_panel_area - useful_area) / standard_panel_area * 100.0).max(0.0)
        } else {
            0.0
        };

        let placements: Vec<PanelPlacement> =
            results.into_iter().flat_map(|r| r.placements).collect();

        // Only offcuts consumed by this run, even if the pool was handed in pre-filled
        let consumed_area: f64 = placements
            .iter()
            .filter_map(|p| p.offcut_id)
            .filter_map(|id| inventory.get(id))
            .map(|offcut| offcut.area)
            .sum();

        let available_offcuts: Vec<Offcut> = inventory.available().cloned().collect();
        let economy = OffcutEconomy {
            consumed_count: offcuts_consumed,
            consumed_area,
            available_count: available_offcuts.len() as u32,
            available_area: available_offcuts.iter().map(|o| o.area).sum(),
        };

        OptimizationReport {
            placements,
            new_panels,
            offcuts_consumed,
            standard_panel_area,
            useful_area,
            waste_percentage,
            walls,
            economy,
            available_offcuts,
        }
    }
}
