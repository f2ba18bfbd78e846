use serde::{Deserialize, Serialize};

/// What a scene element is, for colouring and whole-building measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Foundation,
    Wall,
    AlcoveWall,
    Roof,
    Parapet,
    Canopy,
    CanopyPost,
    Chimney,
    Trim,
    Glass,
    Door,
}

/// Flat shading colours per role, as `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub foundation: String,
    pub walls: String,
    pub roof: String,
    pub parapet: String,
    pub canopy: String,
    pub chimney: String,
    pub trim: String,
    pub glass: String,
    pub doors: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foundation: "#606060".to_string(),
            walls: "#808080".to_string(),
            roof: "#404040".to_string(),
            parapet: "#8B4513".to_string(),
            canopy: "#A0A0A0".to_string(),
            chimney: "#8B4513".to_string(),
            trim: "#FFFFFF".to_string(),
            glass: "#000000".to_string(),
            doors: "#1A1A1A".to_string(),
        }
    }
}

impl Palette {
    pub fn color_for(&self, role: Role) -> &str {
        match role {
            Role::Foundation => &self.foundation,
            Role::Wall | Role::AlcoveWall => &self.walls,
            Role::Trim => &self.trim,
            Role::Glass => &self.glass,
            Role::Door => &self.doors,
            Role::Roof => &self.roof,
            Role::Parapet => &self.parapet,
            Role::Canopy | Role::CanopyPost => &self.canopy,
            Role::Chimney => &self.chimney,
        }
    }

    pub(crate) fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("foundation", &self.foundation),
            ("walls", &self.walls),
            ("roof", &self.roof),
            ("parapet", &self.parapet),
            ("canopy", &self.canopy),
            ("chimney", &self.chimney),
            ("trim", &self.trim),
            ("glass", &self.glass),
            ("doors", &self.doors),
        ]
    }
}

/// Parse `#RRGGBB` into linear 0..1 channels.
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([
        channel(0)? as f32 / 255.0,
        channel(2)? as f32 / 255.0,
        channel(4)? as f32 / 255.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_defaults() {
        let palette = Palette::default();
        for (_, hex) in palette.entries() {
            assert!(parse_hex_color(hex).is_some(), "bad default {}", hex);
        }
        assert_eq!(parse_hex_color("#FF0000"), Some([1.0, 0.0, 0.0]));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(parse_hex_color("808080"), None);
        assert_eq!(parse_hex_color("#80808"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }
}
