use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One opening to be cut into a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoutSpec {
    /// Wall key as written in the document. Resolved to a [`WallKey`] at
    /// cut time so an unknown key only skips this cutout.
    pub wall: String,
    pub width: f64,
    pub height: f64,
    pub position: CutoutPosition,
    #[serde(default)]
    pub recess_depth: f64,
    #[serde(default)]
    pub reveal_depth: f64,
}

/// Opening placement. `z` is the sill (bottom of the opening), not its centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutoutPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A cutout together with its name in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedCutout {
    pub name: String,
    pub spec: CutoutSpec,
}

/// Cutouts in document order.
///
/// Stored as a JSON object keyed by cutout name. Order matters because
/// cutouts on the same wall are applied one after another.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cutouts(Vec<NamedCutout>);

impl Cutouts {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a cutout. Returns false (and keeps the first) on a duplicate name.
    pub fn insert(&mut self, name: impl Into<String>, spec: CutoutSpec) -> bool {
        let name = name.into();
        if self.get(&name).is_some() {
            return false;
        }
        self.0.push(NamedCutout { name, spec });
        true
    }

    pub fn get(&self, name: &str) -> Option<&CutoutSpec> {
        self.0.iter().find(|c| c.name == name).map(|c| &c.spec)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedCutout> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cutouts {
    type Item = &'a NamedCutout;
    type IntoIter = std::slice::Iter<'a, NamedCutout>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Cutouts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for cutout in &self.0 {
            map.serialize_entry(&cutout.name, &cutout.spec)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Cutouts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CutoutsVisitor)
    }
}

struct CutoutsVisitor;

impl<'de> Visitor<'de> for CutoutsVisitor {
    type Value = Cutouts;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of cutout name to cutout")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Cutouts, A::Error> {
        let mut cutouts = Cutouts::new();
        while let Some((name, spec)) = access.next_entry::<String, CutoutSpec>()? {
            if !cutouts.insert(name.clone(), spec) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate cutout name: {}",
                    name
                )));
            }
        }
        Ok(cutouts)
    }
}

/// The walls a cutout may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallKey {
    Front,
    Rear,
    Left,
    Right,
    AlcoveLeft,
    AlcoveRight,
    AlcoveBack,
}

impl WallKey {
    pub const ALL: [WallKey; 7] = [
        WallKey::Front,
        WallKey::Rear,
        WallKey::Left,
        WallKey::Right,
        WallKey::AlcoveLeft,
        WallKey::AlcoveRight,
        WallKey::AlcoveBack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WallKey::Front => "front",
            WallKey::Rear => "rear",
            WallKey::Left => "left",
            WallKey::Right => "right",
            WallKey::AlcoveLeft => "alcove_left",
            WallKey::AlcoveRight => "alcove_right",
            WallKey::AlcoveBack => "alcove_back",
        }
    }

    /// Name of the scene element this key refers to.
    pub fn element_name(self) -> &'static str {
        match self {
            WallKey::Front => "Wall_Front",
            WallKey::Rear => "Wall_Rear",
            WallKey::Left => "Wall_Left",
            WallKey::Right => "Wall_Right",
            WallKey::AlcoveLeft => "Alcove_Wall_Left",
            WallKey::AlcoveRight => "Alcove_Wall_Right",
            WallKey::AlcoveBack => "Alcove_Wall_Back",
        }
    }

    /// True for the two angled alcove side walls.
    pub fn is_angled(self) -> bool {
        matches!(self, WallKey::AlcoveLeft | WallKey::AlcoveRight)
    }

    /// True when the wall's thickness runs along X, so an opening's width
    /// runs along Y.
    pub fn thickness_along_x(self) -> bool {
        matches!(self, WallKey::Left | WallKey::Right)
    }
}

impl fmt::Display for WallKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown wall key: {0:?}")]
pub struct UnknownWallKey(pub String);

impl FromStr for WallKey {
    type Err = UnknownWallKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        WallKey::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| UnknownWallKey(s.to_string()))
    }
}
