use serde::{Deserialize, Serialize};

/// What goes into an opening after it has been cut, keyed in the document
/// by the cutout's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OpeningFill {
    /// Four-sided frame around a single glass pane.
    Window {
        frame: FrameProfile,
        glass: GlassPane,
    },
    /// Three-sided frame (no sill piece) around one or two panels.
    Door {
        frame: FrameProfile,
        panels: DoorPanels,
    },
}

impl OpeningFill {
    pub fn frame(&self) -> &FrameProfile {
        match self {
            OpeningFill::Window { frame, .. } | OpeningFill::Door { frame, .. } => frame,
        }
    }

    pub fn is_door(&self) -> bool {
        matches!(self, OpeningFill::Door { .. })
    }
}

/// Outer size of a frame and the profile of its pieces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameProfile {
    pub width: f64,
    pub height: f64,
    /// Face width of each frame piece.
    pub thickness: f64,
    /// Extent of each piece through the wall.
    pub depth: f64,
}

impl FrameProfile {
    /// Clear width between the side pieces.
    pub fn inner_width(&self) -> f64 {
        self.width - 2.0 * self.thickness
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlassPane {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_glass_thickness")]
    pub thickness: f64,
}

/// Door leaves standing on the sill, side by side when there are two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorPanels {
    #[serde(default = "default_panel_count")]
    pub count: u32,
    /// Width of one leaf.
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_panel_thickness")]
    pub thickness: f64,
    /// Gap between two leaves.
    #[serde(default)]
    pub center_gap: f64,
}

impl DoorPanels {
    /// Width taken by all leaves together.
    pub fn total_width(&self) -> f64 {
        let n = self.count as f64;
        n * self.width + (n - 1.0).max(0.0) * self.center_gap
    }
}

fn default_glass_thickness() -> f64 {
    0.01
}

fn default_panel_count() -> u32 {
    1
}

fn default_panel_thickness() -> f64 {
    0.04
}
