//! Building specification schema shared by every storefront crate.

pub mod cutouts;
pub mod errors;
pub mod fill;
pub mod load;
pub mod migrate;
pub mod palette;
pub mod spec;
pub mod validate;

pub use cutouts::{CutoutPosition, CutoutSpec, Cutouts, NamedCutout, UnknownWallKey, WallKey};
pub use errors::{LoadError, SpecError};
pub use fill::{DoorPanels, FrameProfile, GlassPane, OpeningFill};
pub use load::{load_spec, save_spec, FORMAT_NAME, FORMAT_VERSION};
pub use palette::{parse_hex_color, Palette, Role};
pub use spec::*;
