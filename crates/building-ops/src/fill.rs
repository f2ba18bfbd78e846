//! Frames, glass and door leaves placed inside cut openings.
//!
//! Pieces are laid out in the opening's own frame: x along the wall, y
//! through it, z up from the sill. An [`Orientation`] then carries them to
//! world space, so an angled alcove wall gets the same layout as the facade.

use std::f64::consts::FRAC_PI_2;

use scene_kernel::Vec3;
use storefront_types::{CutoutSpec, DoorAlcove, OpeningFill, Role, WallKey};

use crate::cutter::{alcove_cutter_rotation, normalize_half_turn};
use crate::hexahedron::Hexahedron;
use crate::shapes::Side;
use crate::types::Shape;

/// How an opening's local axes sit in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Opening width runs along X: front, rear and alcove back walls.
    AlongX,
    /// Opening width runs along Y: the left and right walls.
    AlongY,
    /// Rotated about Z by this many radians: the alcove side walls.
    Angled(f64),
}

impl Orientation {
    /// Matches the rotation of the cutter that opened the wall.
    pub fn for_wall(key: WallKey, alcove: Option<&DoorAlcove>) -> Self {
        match (key, alcove) {
            (WallKey::AlcoveLeft, Some(a)) => {
                Orientation::Angled(normalize_half_turn(alcove_cutter_rotation(a, Side::Left)))
            }
            (WallKey::AlcoveRight, Some(a)) => {
                Orientation::Angled(normalize_half_turn(alcove_cutter_rotation(a, Side::Right)))
            }
            _ if key.thickness_along_x() => Orientation::AlongY,
            _ => Orientation::AlongX,
        }
    }

    pub fn rotation_z(self) -> f64 {
        match self {
            Orientation::AlongX => 0.0,
            Orientation::AlongY => FRAC_PI_2,
            Orientation::Angled(r) => r,
        }
    }

    /// A local offset (x along the wall, z up) in world axes.
    fn offset(self, x: f64, z: f64) -> Vec3 {
        match self {
            Orientation::AlongX => [x, 0.0, z],
            Orientation::AlongY => [0.0, x, z],
            Orientation::Angled(r) => {
                let (sin, cos) = r.sin_cos();
                [x * cos, x * sin, z]
            }
        }
    }
}

/// One solid of an opening fill.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPiece {
    pub name: String,
    pub role: Role,
    /// Size along the opening's local axes: along the wall, through it, up.
    pub local_size: Vec3,
    pub center: Vec3,
    pub orientation: Orientation,
}

impl FillPiece {
    /// World-axis size, when the piece is not rotated off the axes.
    pub fn axis_aligned_size(&self) -> Option<Vec3> {
        let [w, d, h] = self.local_size;
        match self.orientation {
            Orientation::AlongX => Some([w, d, h]),
            Orientation::AlongY => Some([d, w, h]),
            Orientation::Angled(_) => None,
        }
    }

    pub fn shape(&self) -> Shape {
        match self.axis_aligned_size() {
            Some(size) => Shape::Box {
                size,
                center: self.center,
            },
            None => {
                let rotation_z = self.orientation.rotation_z();
                Shape::Hexahedron {
                    hex: Hexahedron::oriented_box(self.local_size, self.center, rotation_z),
                    rotation_z,
                }
            }
        }
    }
}

/// Element name prefix for a cutout: `display_window_left` becomes
/// `Display_Window_Left`.
pub fn fill_prefix(cutout_name: &str) -> String {
    cutout_name
        .split(|c: char| c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Lay out every piece of `fill` inside the opening cut for `cutout`.
///
/// The frame is centred on the opening's plan position and stands on its
/// sill. Windows get top, bottom and side pieces around one pane; doors get
/// top and side pieces with their leaves standing on the sill.
pub fn plan_fill(
    cutout_name: &str,
    cutout: &CutoutSpec,
    fill: &OpeningFill,
    orientation: Orientation,
) -> Vec<FillPiece> {
    let prefix = fill_prefix(cutout_name);
    let sill = [cutout.position.x, cutout.position.y, cutout.position.z];
    let frame = fill.frame();
    let (w, h, t, d) = (frame.width, frame.height, frame.thickness, frame.depth);
    let mid = h / 2.0;

    let piece = |suffix: &str, role: Role, local_size: Vec3, x: f64, z: f64| {
        let o = orientation.offset(x, z);
        FillPiece {
            name: format!("{}_{}", prefix, suffix),
            role,
            local_size,
            center: [sill[0] + o[0], sill[1] + o[1], sill[2] + o[2]],
            orientation,
        }
    };
    let side_x = w / 2.0 - t / 2.0;

    let mut pieces = vec![piece("Frame_Top", Role::Trim, [w, d, t], 0.0, h - t / 2.0)];
    match fill {
        OpeningFill::Window { glass, .. } => {
            let side_h = h - 2.0 * t;
            pieces.push(piece("Frame_Bottom", Role::Trim, [w, d, t], 0.0, t / 2.0));
            pieces.push(piece("Frame_Left", Role::Trim, [t, d, side_h], -side_x, mid));
            pieces.push(piece("Frame_Right", Role::Trim, [t, d, side_h], side_x, mid));
            pieces.push(piece(
                "Glass",
                Role::Glass,
                [glass.width, glass.thickness, glass.height],
                0.0,
                mid,
            ));
        }
        OpeningFill::Door { panels, .. } => {
            let side_h = h - t;
            let side_z = side_h / 2.0;
            pieces.push(piece("Frame_Left", Role::Trim, [t, d, side_h], -side_x, side_z));
            pieces.push(piece("Frame_Right", Role::Trim, [t, d, side_h], side_x, side_z));

            let size = [panels.width, panels.thickness, panels.height];
            let z = panels.height / 2.0;
            if panels.count == 2 {
                let x = panels.width / 2.0 + panels.center_gap / 2.0;
                pieces.push(piece("Panel_Left", Role::Door, size, -x, z));
                pieces.push(piece("Panel_Right", Role::Door, size, x, z));
            } else {
                pieces.push(piece("Panel", Role::Door, size, 0.0, z));
            }
        }
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_title_cases_each_word() {
        assert_eq!(fill_prefix("display_window_left"), "Display_Window_Left");
        assert_eq!(fill_prefix("rear-door"), "Rear_Door");
        assert_eq!(fill_prefix("x"), "X");
    }

    #[test]
    fn side_walls_turn_a_quarter() {
        assert_eq!(Orientation::for_wall(WallKey::Left, None), Orientation::AlongY);
        assert_eq!(Orientation::for_wall(WallKey::Front, None), Orientation::AlongX);
        // Without an alcove there is no angle to take.
        assert_eq!(
            Orientation::for_wall(WallKey::AlcoveLeft, None),
            Orientation::AlongX
        );
    }
}
