use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::errors::LoadError;
use crate::spec::BuildingSpec;

/// Current document format version.
pub const FORMAT_VERSION: u32 = 1;

/// Format identifier expected in every document.
pub const FORMAT_NAME: &str = "storefront-spec";

/// Document envelope as read from disk, before migration.
///
/// `building` stays unparsed text so a current-version document is read
/// exactly once, with cutout order and duplicate names intact.
#[derive(Debug, Deserialize)]
struct RawDocument {
    format: String,
    version: u32,
    building: Box<RawValue>,
}

#[derive(Debug, Clone, Serialize)]
struct Document<'a> {
    format: &'static str,
    version: u32,
    building: &'a BuildingSpec,
}

/// Parse, migrate and validate a specification document.
pub fn load_spec(json: &str) -> Result<BuildingSpec, LoadError> {
    let raw: RawDocument =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if raw.format != FORMAT_NAME {
        return Err(LoadError::UnknownFormat(raw.format));
    }

    if raw.version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: raw.version,
            supported_version: FORMAT_VERSION,
        });
    }

    let spec: BuildingSpec = if raw.version < FORMAT_VERSION {
        let old: serde_json::Value = serde_json::from_str(raw.building.get())
            .map_err(|e| LoadError::ParseError(e.to_string()))?;
        let building = crate::migrate::migrate(old, raw.version, FORMAT_VERSION)?;
        serde_json::from_value(building)
    } else {
        serde_json::from_str(raw.building.get())
    }
    .map_err(|e| LoadError::ParseError(e.to_string()))?;
    spec.validate()?;
    Ok(spec)
}

/// Serialize a specification as a pretty-printed current-version document.
pub fn save_spec(spec: &BuildingSpec) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Document {
        format: FORMAT_NAME,
        version: FORMAT_VERSION,
        building: spec,
    })
}
