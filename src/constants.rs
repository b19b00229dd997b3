//! Global constants for the floor-plan annotator

/// Default number of commands kept in the undo history
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Minimum number of vertices for a drawn polygon outline
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Name given to groups created through the quick-create path
pub const DEFAULT_GROUP_NAME: &str = "New Group";

/// Color given to groups created through the quick-create path
pub const QUICK_GROUP_COLOR: [u8; 3] = [100, 150, 250];

/// Fill color for masks without a (live) group
pub const UNASSIGNED_COLOR: [u8; 3] = [200, 200, 200];

/// Outline color for selected masks
pub const SELECTED_STROKE_COLOR: [u8; 3] = [255, 0, 0];

/// Outline color for unselected masks
pub const DEFAULT_STROKE_COLOR: [u8; 3] = [0, 0, 0];

/// Outline width for selected masks
pub const SELECTED_STROKE_WIDTH: f32 = 3.0;

/// Outline width for unselected masks
pub const DEFAULT_STROKE_WIDTH: f32 = 1.0;

/// Group picker popover width in screen pixels
pub const POPOVER_WIDTH: f32 = 248.0;

/// Approximate maximum group picker height in screen pixels
pub const POPOVER_HEIGHT: f32 = 340.0;

/// Distance between cursor and popover corner
pub const POPOVER_OFFSET: f32 = 10.0;

/// Margin kept between popover and viewport edge
pub const POPOVER_VIEWPORT_MARGIN: f32 = 8.0;
