pub mod cutter;
pub mod execute;
pub mod fill;
pub mod hexahedron;
pub mod shapes;
pub mod types;

pub use cutter::{
    alcove_cutter_rotation, cutter_center, cutter_depth, normalize_half_turn,
    wall_direction_angle, CutterPlan, CUTTER_CLEARANCE,
};
pub use execute::{execute_cut, execute_shape};
pub use fill::{fill_prefix, plan_fill, FillPiece, Orientation};
pub use hexahedron::{Hexahedron, HEX_FACES};
pub use shapes::{alcove_ceiling, alcove_side_wall, chimney_gable, Side};
pub use types::*;
