use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cutouts::Cutouts;
use crate::fill::OpeningFill;
use crate::palette::Palette;

/// The validated description of a single building.
///
/// Every optional section carries its defaults here, so no caller ever
/// supplies a fallback value of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub overall: Overall,
    pub walls: Walls,
    #[serde(default)]
    pub foundation: Foundation,
    pub roof: Roof,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parapet: Option<Parapet>,
    pub canopy: Canopy,
    pub chimney: Chimney,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_alcove: Option<DoorAlcove>,
    pub cutouts: Cutouts,
    /// Frames, glass and door leaves for cut openings, by cutout name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub opening_fill: BTreeMap<String, OpeningFill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_targets: Option<ValidationTargets>,
    #[serde(default)]
    pub colors: Palette,
}

/// Building footprint on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overall {
    /// Extent along X.
    pub width: f64,
    /// Extent along Y. The front facade faces -Y.
    pub depth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Walls {
    pub thickness: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Foundation {
    #[serde(default = "default_foundation_height")]
    pub height: f64,
}

impl Default for Foundation {
    fn default() -> Self {
        Self {
            height: default_foundation_height(),
        }
    }
}

/// Flat roof slab. Width and depth default to the footprint plus one wall
/// thickness so the slab covers the wall tops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Roof {
    pub thickness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

/// Stepped parapet sitting on the roof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parapet {
    #[serde(default = "default_parapet_thickness")]
    pub thickness: f64,
    /// Height of the front facade piece above the roof top.
    #[serde(default = "default_front_height")]
    pub front_height: f64,
    /// Side steps, front to back. Spans must add up to the building depth.
    #[serde(default = "default_parapet_steps")]
    pub steps: Vec<ParapetStep>,
}

impl Default for Parapet {
    fn default() -> Self {
        Self {
            thickness: default_parapet_thickness(),
            front_height: default_front_height(),
            steps: default_parapet_steps(),
        }
    }
}

/// One level of the stepped side parapet. A height of zero produces no
/// geometry but the span still counts toward the depth total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParapetStep {
    pub span: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canopy {
    pub width: f64,
    pub depth: f64,
    /// Underside elevation of the canopy roof.
    pub height: f64,
    #[serde(default = "default_canopy_roof_thickness")]
    pub roof_thickness: f64,
    /// Plan position of the canopy roof centre. Defaults to hanging off the
    /// front wall, centred on X.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<PlanPoint>,
    #[serde(default)]
    pub posts: Vec<CanopyPost>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanopyPost {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chimney {
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub depth: f64,
    #[serde(default = "default_chimney_height")]
    pub height_above_roof: f64,
    /// Elevation of the chimney base. Defaults to the roof top.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gable: Option<ChimneyGable>,
}

/// Gabled cap on the chimney. The ridge runs along Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChimneyGable {
    #[serde(default = "default_gable_height")]
    pub height: f64,
    /// Width of the flat ridge strip; zero gives a sharp ridge.
    #[serde(default)]
    pub ridge_width: f64,
}

/// Angled entry alcove recessed into the front facade.
///
/// The side walls run from `y_front` back to the front face of the back wall
/// and narrow toward the interior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorAlcove {
    pub y_front: f64,
    pub y_back: f64,
    pub left: AlcoveSide,
    pub right: AlcoveSide,
    pub thickness: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_wall: Option<AlcoveBackWall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<AlcoveCeiling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bar: Option<HeaderBar>,
}

/// X centreline of one alcove side wall at its front and back edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlcoveSide {
    pub front_x: f64,
    pub back_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlcoveBackWall {
    pub width: f64,
    pub height: f64,
    pub position_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlcoveCeiling {
    pub thickness: f64,
    pub elevation: f64,
    pub front_width: f64,
    pub back_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderBar {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub position: HeaderPosition,
}

/// Header bar placement; `z_top` is the elevation of the bar's top face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderPosition {
    pub x: f64,
    pub y: f64,
    pub z_top: f64,
}

/// Whole-building measurement targets. Zero means "not checked".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationTargets {
    pub overall_width: f64,
    pub overall_depth: f64,
    pub wall_height: f64,
    pub parapet_height_front: f64,
    pub parapet_level_heights: Vec<f64>,
    pub canopy_width: f64,
    pub canopy_depth: f64,
    pub canopy_post_count: Option<u32>,
    pub chimney_total_height: f64,
}

impl BuildingSpec {
    pub fn roof_width(&self) -> f64 {
        self.roof
            .width
            .unwrap_or(self.overall.width + self.walls.thickness)
    }

    pub fn roof_depth(&self) -> f64 {
        self.roof
            .depth
            .unwrap_or(self.overall.depth + self.walls.thickness)
    }

    /// Elevation of the roof's top face.
    pub fn roof_top(&self) -> f64 {
        self.walls.height + self.roof.thickness
    }

    pub fn chimney_base(&self) -> f64 {
        self.chimney.base_elevation.unwrap_or_else(|| self.roof_top())
    }

    pub fn chimney_top(&self) -> f64 {
        self.chimney_base() + self.chimney.height_above_roof
    }

    pub fn canopy_center(&self) -> PlanPoint {
        self.canopy.center.unwrap_or(PlanPoint {
            x: 0.0,
            y: -self.overall.depth / 2.0 - self.canopy.depth / 2.0,
        })
    }

    /// Targets for the whole-building pass: the document's own targets when
    /// present, otherwise targets derived from the document's dimensions.
    pub fn effective_targets(&self) -> ValidationTargets {
        match &self.validation_targets {
            Some(targets) => targets.clone(),
            None => ValidationTargets::derived_from(self),
        }
    }
}

impl ValidationTargets {
    /// Targets implied by the document itself: the outer wall envelope, the
    /// parapet step heights, the canopy slab and the chimney top.
    pub fn derived_from(spec: &BuildingSpec) -> Self {
        let (front, levels) = match &spec.parapet {
            Some(p) => (p.front_height, p.steps.iter().map(|s| s.height).collect()),
            None => (0.0, Vec::new()),
        };
        Self {
            overall_width: spec.overall.width + spec.walls.thickness,
            overall_depth: spec.overall.depth + spec.walls.thickness,
            wall_height: spec.walls.height,
            parapet_height_front: front,
            parapet_level_heights: levels,
            canopy_width: spec.canopy.width,
            canopy_depth: spec.canopy.depth,
            canopy_post_count: Some(spec.canopy.posts.len() as u32),
            chimney_total_height: spec.chimney_top(),
        }
    }
}

impl DoorAlcove {
    /// Clear distance between the side wall centrelines at the facade.
    pub fn front_opening(&self) -> f64 {
        self.right.front_x - self.left.front_x
    }

    /// Clear distance between the side wall centrelines at the back.
    pub fn back_opening(&self) -> f64 {
        self.right.back_x - self.left.back_x
    }

    /// Y where the side walls stop: the front face of the back wall.
    pub fn side_wall_back_y(&self) -> f64 {
        self.y_back - self.thickness / 2.0
    }
}

fn default_foundation_height() -> f64 {
    0.28
}

fn default_parapet_thickness() -> f64 {
    0.10
}

fn default_front_height() -> f64 {
    0.53
}

fn default_parapet_steps() -> Vec<ParapetStep> {
    vec![
        ParapetStep {
            span: 3.75,
            height: 0.45,
        },
        ParapetStep {
            span: 3.75,
            height: 0.30,
        },
        ParapetStep {
            span: 3.75,
            height: 0.15,
        },
        ParapetStep {
            span: 3.75,
            height: 0.0,
        },
    ]
}

fn default_canopy_roof_thickness() -> f64 {
    0.35
}

fn default_chimney_height() -> f64 {
    1.5
}

fn default_gable_height() -> f64 {
    0.3
}
