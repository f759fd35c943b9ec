use serde::{Deserialize, Serialize};

/// Default smallest side (cm) an offcut must exceed to be kept for reuse.
pub const DEFAULT_MIN_OFFCUT_SIDE: f64 = 10.0;

/// Standard panel size as sold, before any rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelDimensions {
    pub width: f64,
    pub height: f64,
}

impl PanelDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Rectangular cutout in a wall (door, window, socket...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opening {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Free-form label ("door", "window", "socket", or anything user defined).
    /// Only carried through to the cuts it causes.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Opening {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Wall to cover, dimensions in centimeters, origin bottom-left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub openings: Vec<Opening>,
}

impl Wall {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Input: what the user provides for one optimization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub panel: PanelDimensions,
    pub walls: Vec<Wall>,
    /// Feed leftover material back into later placements
    #[serde(default = "default_true")]
    pub use_offcuts: bool,
    /// Smallest side (cm) an offcut must exceed to be considered reusable
    #[serde(default)]
    pub min_offcut_side: Option<f64>,
    /// Also harvest the material framing each cut region as offcuts
    #[serde(default = "default_true")]
    pub offcuts_from_cuts: bool,
}

impl OptimizationRequest {
    /// Request with the default run options.
    pub fn new(panel: PanelDimensions, walls: Vec<Wall>) -> Self {
        Self {
            panel,
            walls,
            use_offcuts: true,
            min_offcut_side: None,
            offcuts_from_cuts: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Panel used at its given width/height
    Normal,
    /// Panel turned 90°, width and height swapped
    Rotated,
}

/// Tiling chosen for one wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationConfig {
    pub orientation: Orientation,
    /// Effective panel width once the orientation is applied
    pub panel_width: f64,
    /// Effective panel height once the orientation is applied
    pub panel_height: f64,
    pub tiles_x: u32,
    pub tiles_y: u32,
}

/// Region removed from a panel because an opening sits behind it.
/// Coordinates are local to the owning panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One panel (or offcut) positioned on a wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelPlacement {
    pub wall_id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
    /// Smaller than the effective panel in at least one direction
    pub needs_trim: bool,
    pub cuts: Vec<Cut>,
    /// Offcut this placement is cut from; `None` means a fresh standard panel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offcut_id: Option<u64>,
}

impl PanelPlacement {
    pub fn from_offcut(&self) -> bool {
        self.offcut_id.is_some()
    }
}

/// Where on the original panel an offcut was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffcutPosition {
    /// Strip right of the trimmed width
    Right,
    /// Strip above the trimmed height
    Top,
    /// Corner left when both width and height were trimmed
    Corner,
    LeftOfCut,
    RightOfCut,
    BelowCut,
    AboveCut,
}

/// Placement an offcut was produced by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffcutOrigin {
    pub wall_id: String,
    /// Index of the placement within its wall's placement list
    pub placement_index: usize,
    /// Wall coordinates of the originating placement
    pub x: f64,
    pub y: f64,
}

/// Reusable leftover piece of panel material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offcut {
    pub id: u64,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub origin: OffcutOrigin,
    pub position: OffcutPosition,
    /// Position of the piece relative to the original panel's bottom-left corner
    pub local_x: f64,
    pub local_y: f64,
    pub consumed: bool,
}

/// Placement output for a single wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallPlacementResult {
    pub wall_id: String,
    pub orientation: OrientationConfig,
    pub placements: Vec<PanelPlacement>,
    /// Placements cut from fresh standard panels
    pub new_panels: u32,
    pub offcuts_consumed: u32,
    /// Offcuts added to the pool while placing this wall
    pub offcuts_generated: u32,
    pub useful_area: f64,
}

/// Per-wall breakdown in the final report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSummary {
    pub wall_id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub openings: usize,
    pub orientation: Orientation,
    pub new_panels: u32,
    pub offcuts_consumed: u32,
    pub offcuts_generated: u32,
    pub useful_area: f64,
}

impl WallSummary {
    /// Wall name, falling back to its id when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.wall_id
        } else {
            &self.name
        }
    }
}

/// How much material offcut reuse saved, and what is left over
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffcutEconomy {
    pub consumed_count: u32,
    pub consumed_area: f64,
    pub available_count: u32,
    pub available_area: f64,
}

/// Output: what the optimizer returns for a whole project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// Every placement of every wall, in wall order then scan order
    pub placements: Vec<PanelPlacement>,
    /// Standard panels to buy
    pub new_panels: u32,
    pub offcuts_consumed: u32,
    /// `new_panels` times the area of one standard panel
    pub standard_panel_area: f64,
    /// Wall area minus openings, summed across walls
    pub useful_area: f64,
    pub waste_percentage: f64,
    pub walls: Vec<WallSummary>,
    pub economy: OffcutEconomy,
    /// Offcuts never consumed during the run, largest first
    pub available_offcuts: Vec<Offcut>,
}

/// Error type for optimization
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
