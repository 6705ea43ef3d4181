//! Surface colors: the name lookup and the categorical palette.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SectionError};
use crate::model::Surface;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Creates a color from its components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from components in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_vec3(v: Vec3) -> Self {
        let c = (v.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
        Self::rgb(c.x as u8, c.y as u8, c.z as u8)
    }

    /// Components in `[0, 1]`.
    #[must_use]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(
            f32::from(self.r),
            f32::from(self.g),
            f32::from(self.b),
        ) / 255.0
    }

    /// `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        let bad = || SectionError::InvalidColor(s.to_string());
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Surface name to display color, in surface-table order.
///
/// A name listed twice keeps its first position and takes the last color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorLookup {
    colors: IndexMap<String, Color>,
}

impl ColorLookup {
    /// Builds the lookup from a surface table.
    #[must_use]
    pub fn from_surfaces(surfaces: &[Surface]) -> Self {
        let mut colors = IndexMap::with_capacity(surfaces.len());
        for s in surfaces {
            colors.insert(s.name.clone(), s.color);
        }
        Self { colors }
    }

    /// Color of a surface.
    #[must_use]
    pub fn get(&self, surface: &str) -> Option<Color> {
        self.colors.get(surface).copied()
    }

    /// Color of a surface, falling back to black for unknown names.
    #[must_use]
    pub fn get_or_black(&self, surface: &str) -> Color {
        self.get(surface).unwrap_or(Color::BLACK)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if no surfaces are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates `(name, color)` in surface order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Categorical palette for block ids.
///
/// Ids are normalized over `[0.5, n + 0.5]`, so id `k` maps to color
/// `k - 1`; values outside the range clamp to the end colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Palette listing every surface color in table order.
    #[must_use]
    pub fn from_surfaces(surfaces: &[Surface]) -> Self {
        Self {
            colors: surfaces.iter().map(|s| s.color).collect(),
        }
    }

    /// Creates a palette from explicit colors.
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette has no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at a palette position.
    #[must_use]
    pub fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Color for a block id, or `None` for NaN or an empty palette.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn color_for_id(&self, value: f64) -> Option<Color> {
        if self.colors.is_empty() || value.is_nan() {
            return None;
        }
        let n = self.colors.len();
        let t = (value - 0.5) / n as f64;
        let idx = (t * n as f64).floor().clamp(0.0, (n - 1) as f64) as usize;
        Some(self.colors[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn surface(name: &str, color: &str, id: u32) -> Surface {
        Surface {
            name: name.to_string(),
            series: "Default".to_string(),
            id,
            color: color.parse().unwrap(),
            properties: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn test_parse_hex() {
        let c: Color = "#015482".parse().unwrap();
        assert_eq!(c, Color::rgb(0x01, 0x54, 0x82));
        assert_eq!(c.to_hex(), "#015482");
        assert!("#01548".parse::<Color>().is_err());
        assert!("#zz5482".parse::<Color>().is_err());
        assert_eq!("ffffff".parse::<Color>().unwrap(), Color::WHITE);
    }

    #[test]
    fn test_serde_roundtrip_as_string() {
        let c = Color::rgb(255, 0, 16);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_lookup_duplicate_names() {
        let surfaces = vec![
            surface("rock1", "#015482", 1),
            surface("rock2", "#9f0052", 2),
            surface("rock1", "#ffbe00", 3),
        ];
        let lookup = ColorLookup::from_surfaces(&surfaces);
        assert_eq!(lookup.len(), 2);
        let names: Vec<&str> = lookup.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["rock1", "rock2"]);
        assert_eq!(lookup.get("rock1"), Some(Color::rgb(0xff, 0xbe, 0x00)));
        assert_eq!(lookup.get_or_black("missing"), Color::BLACK);
    }

    #[test]
    fn test_palette_ids() {
        let palette = Palette::new(vec![Color::BLACK, Color::BLUE, Color::WHITE]);
        assert_eq!(palette.color_for_id(1.0), Some(Color::BLACK));
        assert_eq!(palette.color_for_id(2.0), Some(Color::BLUE));
        assert_eq!(palette.color_for_id(3.0), Some(Color::WHITE));
        assert_eq!(palette.color_for_id(2.4), Some(Color::BLUE));
        assert_eq!(palette.color_for_id(-7.0), Some(Color::BLACK));
        assert_eq!(palette.color_for_id(42.0), Some(Color::WHITE));
        assert_eq!(palette.color_for_id(f64::NAN), None);
        assert_eq!(Palette::new(Vec::new()).color_for_id(1.0), None);
    }

    #[test]
    fn test_vec3_conversion() {
        let c = Color::rgb(255, 128, 0);
        assert_eq!(Color::from_vec3(c.to_vec3()), c);
    }

    proptest! {
        #[test]
        fn lookup_has_one_entry_per_distinct_name(names in proptest::collection::vec("[a-d]{1,2}", 0..20)) {
            let surfaces: Vec<Surface> = names
                .iter()
                .enumerate()
                .map(|(i, n)| surface(n, "#808080", u32::try_from(i).unwrap() + 1))
                .collect();
            let lookup = ColorLookup::from_surfaces(&surfaces);
            let distinct: std::collections::HashSet<&String> = names.iter().collect();
            prop_assert_eq!(lookup.len(), distinct.len());
            for n in &names {
                prop_assert!(lookup.get(n).is_some());
            }
        }
    }
}
