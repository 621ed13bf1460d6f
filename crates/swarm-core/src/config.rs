//! Configuration accepted by the core, and the built-in preset table.
//!
//! Field names follow the saved-preset record (`template`, `particle_count`,
//! `particle_size`, `rainbow_mode`) so a stored record deserializes straight
//! into a [`SwarmConfig`].

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

use crate::color::parse_hex;
use crate::constants::*;
use crate::error::ConfigError;
use crate::shapes::ShapeFamily;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwarmConfig {
    #[serde(rename = "template")]
    pub shape: ShapeFamily,
    pub color: String,
    pub particle_count: usize,
    pub particle_size: f32,
    #[serde(rename = "rainbow_mode", default)]
    pub rainbow: bool,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            shape: ShapeFamily::Hearts,
            color: "#ff4fd8".to_string(),
            particle_count: 12_000,
            particle_size: 6.0,
            rainbow: false,
        }
    }
}

impl SwarmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PARTICLES..=MAX_PARTICLES).contains(&self.particle_count) {
            return Err(ConfigError::ParticleCount {
                count: self.particle_count,
                min: MIN_PARTICLES,
                max: MAX_PARTICLES,
            });
        }
        if !(MIN_BASE_SIZE..=MAX_BASE_SIZE).contains(&self.particle_size) {
            return Err(ConfigError::BaseSize {
                size: self.particle_size,
                min: MIN_BASE_SIZE,
                max: MAX_BASE_SIZE,
            });
        }
        parse_hex(&self.color)?;
        Ok(())
    }

    /// Base color as 0..1 RGB.
    pub fn rgb(&self) -> Result<[f32; 3], ConfigError> {
        parse_hex(&self.color)
    }

    /// True when switching from `self` to `next` needs fresh particle buffers.
    pub fn needs_rebuild(&self, next: &SwarmConfig) -> bool {
        self.shape != next.shape
            || self.particle_count != next.particle_count
            || self.particle_size != next.particle_size
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Romantic,
    Party,
    Nature,
    Cosmic,
    Abstract,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub shape: ShapeFamily,
    pub color: &'static str,
    pub count: usize,
    pub size: f32,
    pub category: PresetCategory,
}

impl Preset {
    pub fn config(&self) -> SwarmConfig {
        SwarmConfig {
            shape: self.shape,
            color: self.color.to_string(),
            particle_count: self.count,
            particle_size: self.size,
            rainbow: false,
        }
    }
}

macro_rules! preset {
    (
        $id:literal,
        $name:literal,
        $shape:ident,
        $color:literal,
        $count:literal,
        $size:literal,
        $cat:ident $(,)?
    ) => {
        Preset {
            id: $id,
            name: $name,
            shape: ShapeFamily::$shape,
            color: $color,
            count: $count,
            size: $size,
            category: PresetCategory::$cat,
        }
    };
}

pub static PRESETS: &[Preset] = &[
    preset!(
        "romantic-hearts",
        "Romantic Hearts",
        Hearts,
        "#ff1744",
        15_000,
        8.0,
        Romantic,
    ),
    preset!(
        "wedding-flowers",
        "Wedding Flowers",
        Flowers,
        "#f8bbd0",
        18_000,
        6.0,
        Romantic,
    ),
    preset!(
        "cosmic-galaxy",
        "Cosmic Galaxy",
        Galaxy,
        "#7c4dff",
        20_000,
        4.0,
        Cosmic,
    ),
    preset!(
        "life-dna",
        "Life DNA",
        Dna,
        "#00e676",
        12_000,
        7.0,
        Abstract,
    ),
    preset!(
        "party-fireworks",
        "Party Fireworks",
        Fireworks,
        "#ffd600",
        16_000,
        10.0,
        Party,
    ),
    preset!(
        "butterfly-garden",
        "Butterfly Garden",
        Butterfly,
        "#ff6e40",
        14_000,
        6.0,
        Nature,
    ),
    preset!(
        "ocean-wave",
        "Ocean Wave",
        Wave,
        "#00b8d4",
        22_000,
        5.0,
        Nature,
    ),
    preset!(
        "tornado-vortex",
        "Tornado Vortex",
        Vortex,
        "#78909c",
        17_000,
        5.0,
        Abstract,
    ),
    preset!(
        "northern-lights",
        "Northern Lights",
        Aurora,
        "#1de9b6",
        19_000,
        6.0,
        Cosmic,
    ),
    preset!(
        "sunset-galaxy",
        "Sunset Galaxy",
        Galaxy,
        "#ff5722",
        18_000,
        5.0,
        Cosmic,
    ),
];

/// Presets indexed by id.
pub struct PresetIndex {
    by_id: FnvHashMap<&'static str, &'static Preset>,
}

impl Default for PresetIndex {
    fn default() -> Self {
        Self {
            by_id: PRESETS.iter().map(|p| (p.id, p)).collect(),
        }
    }
}

impl PresetIndex {
    pub fn get(&self, id: &str) -> Result<&'static Preset, ConfigError> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| ConfigError::UnknownPreset(id.to_string()))
    }

    pub fn by_category(&self, category: PresetCategory) -> impl Iterator<Item = &'static Preset> {
        PRESETS.iter().filter(move |p| p.category == category)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SwarmConfig::default().validate(), Ok(()));
    }

    #[test]
    fn every_preset_is_valid_and_unique() {
        let index = PresetIndex::default();
        assert_eq!(index.len(), PRESETS.len());
        for p in PRESETS {
            assert_eq!(p.config().validate(), Ok(()), "{}", p.id);
            assert_eq!(index.get(p.id).unwrap().name, p.name);
        }
        assert_eq!(index.by_category(PresetCategory::Cosmic).count(), 3);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut cfg = SwarmConfig {
            particle_count: 0,
            ..SwarmConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ParticleCount { .. })));
        cfg.particle_count = MAX_PARTICLES + 1;
        assert!(matches!(cfg.validate(), Err(ConfigError::ParticleCount { .. })));
        cfg.particle_count = MIN_PARTICLES;
        cfg.particle_size = 0.5;
        assert!(matches!(cfg.validate(), Err(ConfigError::BaseSize { .. })));
        cfg.particle_size = 6.0;
        cfg.color = "pink".into();
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidColor(_))));
    }

    #[test]
    fn color_and_rainbow_changes_do_not_rebuild() {
        let a = SwarmConfig::default();
        let b = SwarmConfig {
            color: "#00ff00".into(),
            rainbow: true,
            ..a.clone()
        };
        assert!(!a.needs_rebuild(&b));
        let c = SwarmConfig {
            particle_count: 5_000,
            ..a.clone()
        };
        assert!(a.needs_rebuild(&c));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert_eq!(
            PresetIndex::default().get("disco").unwrap_err(),
            ConfigError::UnknownPreset("disco".into())
        );
    }
}
