use crate::types::{Orientation, OrientationConfig, PanelDimensions};

/// Weight of one extra panel in the orientation score. Large enough that the
/// panel count always dominates the wasted area.
const PANEL_COUNT_WEIGHT: f64 = 10000.0;

/// Picks between the panel as given and the panel turned 90°.
///
/// Each candidate is scored `tiles * 10000 + wasted area`; the strictly lower
/// score wins and an exact tie keeps the unrotated panel.
pub fn select_orientation(
    wall_width: f64,
    wall_height: f64,
    panel: PanelDimensions,
) -> OrientationConfig {
    let normal = tile(Orientation::Normal, wall_width, wall_height, panel.width, panel.height);
    let rotated = tile(Orientation::Rotated, wall_width, wall_height, panel.height, panel.width);

    if score(&rotated, wall_width, wall_height) < score(&normal, wall_width, wall_height) {
        rotated
    } else {
        normal
    }
}

fn tile(
    orientation: Orientation,
    wall_width: f64,
    wall_height: f64,
    panel_width: f64,
    panel_height: f64,
) -> OrientationConfig {
    OrientationConfig {
        orientation,
        panel_width,
        panel_height,
        tiles_x: (wall_width / panel_width).ceil() as u32,
        tiles_y: (wall_height / panel_height).ceil() as u32,
    }
}

fn score(config: &OrientationConfig, wall_width: f64, wall_height: f64) -> f64 {
    let tiles = f64::from(config.tiles_x) * f64::from(config.tiles_y);
    let wasted = tiles * config.panel_width * config.panel_height - wall_width * wall_height;
    tiles * PANEL_COUNT_WEIGHT + wasted
}
