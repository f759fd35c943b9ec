use super::*;
use crate::geometry::{contains, intersect, overlaps, Rect};
use crate::inventory::identify_offcuts;

impl Optimizer {
    /// Tiles the wall row by row from the bottom-left corner.
    ///
    /// Boundary tiles are clipped to the wall, tiles hidden behind a single
    /// opening are dropped, and each remaining tile records the cuts for the
    /// openings it overlaps. Leftovers of every placement go into `inventory`
    /// right after it is placed, so later tiles of the same wall may reuse them.
    /// Returns the placements and the number of offcuts added to the pool.
    pub(super) fn place_panels(
        &self,
        wall: &Wall,
        openings: &[Opening],
        config: &OrientationConfig,
        inventory: &mut OffcutInventory,
    ) -> (Vec<PanelPlacement>, u32) {
        let opening_rects: Vec<Rect> = openings.iter().map(Rect::from).collect();
        let mut placements = Vec::new();
        let mut offcuts_generated = 0;

        for row in 0..config.tiles_y {
            for col in 0..config.tiles_x {
                let x = f64::from(col) * config.panel_width;
                let y = f64::from(row) * config.panel_height;
                let width = config.panel_width.min(wall.width - x);
                let height = config.panel_height.min(wall.height - y);

                if width <= 0.0 || height <= 0.0 {
                    continue;
                }

                let rect = Rect::new(x, y, width, height);
                if opening_rects.iter().any(|opening| contains(opening, &rect)) {
                    continue;
                }

                let source = if self.request.use_offcuts {
                    inventory.consume_fit(width, height)
                } else {
                    None
                };

                let cuts = openings
                    .iter()
                    .zip(&opening_rects)
                    .filter(|(_, opening_rect)| overlaps(&rect, opening_rect))
                    .map(|(opening, opening_rect)| {
                        let local = intersect(&rect, opening_rect).translate_into(&rect);
                        Cut {
                            x: local.x,
                            y: local.y,
                            width: local.width,
                            height: local.height,
                            kind: opening.kind.clone(),
                        }
                    })
                    .collect();

                let placement = PanelPlacement {
                    wall_id: wall.id.clone(),
                    x,
                    y,
                    width,
                    height,
                    orientation: config.orientation,
                    needs_trim: width < config.panel_width || height < config.panel_height,
                    cuts,
                    offcut_id: source.as_ref().map(|offcut| offcut.id),
                };

                // Leftovers are measured against the piece actually cut
                let source_dims = match &source {
                    Some(offcut) => PanelDimensions::new(offcut.width, offcut.height),
                    None => PanelDimensions::new(config.panel_width, config.panel_height),
                };
                let candidates = identify_offcuts(
                    &placement,
                    source_dims,
                    self.min_offcut_side(),
                    self.request.offcuts_from_cuts,
                );
                if !candidates.is_empty() {
                    let origin = OffcutOrigin {
                        wall_id: wall.id.clone(),
                        placement_index: placements.len(),
                        x,
                        y,
                    };
                    offcuts_generated += inventory.add(&origin, candidates).len() as u32;
                }

                placements.push(placement);
            }
        }

        (placements, offcuts_generated)
    }
}
