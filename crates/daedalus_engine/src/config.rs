use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{PaletteIndex, Result};

// =============================================================================
// Project directory constants
// =============================================================================

const PROJECT_QUALIFIER: &str = "com";
const PROJECT_ORGANIZATION: &str = "GitHub";
const PROJECT_APPLICATION: &str = "daedalus";

lazy_static::lazy_static! {
    static ref PROJECT_DIRS: Option<directories::ProjectDirs> = directories::ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION);
}

// =============================================================================
// Keybinds
// =============================================================================

/// Keys are laid out as a 4x4 block on the physical keyboard, one per palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeybindConfig {
    #[default]
    Qwerty,
    Colemak,
    ColemakDh,
    Dvorak,
}

const QWERTY_KEYS: [&str; PaletteIndex::COUNT] = ["1", "2", "3", "4", "q", "w", "e", "r", "a", "s", "d", "f", "z", "x", "c", "v"];
const COLEMAK_KEYS: [&str; PaletteIndex::COUNT] = ["1", "2", "3", "4", "q", "w", "f", "p", "a", "r", "s", "t", "z", "x", "c", "v"];
const COLEMAK_DH_KEYS: [&str; PaletteIndex::COUNT] = ["1", "2", "3", "4", "q", "w", "f", "p", "a", "r", "s", "t", "z", "x", "c", "d"];
const DVORAK_KEYS: [&str; PaletteIndex::COUNT] = ["1", "2", "3", "4", "'", ",", ".", "p", "a", "o", "e", "u", ";", "q", "j", "k"];

impl KeybindConfig {
    pub const ALL: &'static [KeybindConfig] = &[KeybindConfig::Qwerty, KeybindConfig::Colemak, KeybindConfig::ColemakDh, KeybindConfig::Dvorak];

    pub fn name(self) -> &'static str {
        match self {
            KeybindConfig::Qwerty => "qwerty",
            KeybindConfig::Colemak => "colemak",
            KeybindConfig::ColemakDh => "colemakdh",
            KeybindConfig::Dvorak => "dvorak",
        }
    }

    pub fn from_name(name: &str) -> Option<KeybindConfig> {
        Self::ALL.iter().copied().find(|cfg| cfg.name() == name)
    }

    pub fn keys(self) -> &'static [&'static str; PaletteIndex::COUNT] {
        match self {
            KeybindConfig::Qwerty => &QWERTY_KEYS,
            KeybindConfig::Colemak => &COLEMAK_KEYS,
            KeybindConfig::ColemakDh => &COLEMAK_DH_KEYS,
            KeybindConfig::Dvorak => &DVORAK_KEYS,
        }
    }

    pub fn key_to_index(self, key: &str) -> Option<PaletteIndex> {
        let slot = self.keys().iter().position(|k| *k == key)?;
        PaletteIndex::new(slot as u8)
    }

    pub fn index_to_key(self, index: PaletteIndex) -> &'static str {
        self.keys()[index.value() as usize]
    }
}

impl std::fmt::Display for KeybindConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// DrawMode
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Instruction prefixes and literals are filled in for the user.
    #[default]
    Assisted,
    /// Every key paints exactly one cell.
    Free,
}

// =============================================================================
// IdeConfig
// =============================================================================

/// Editor preferences. Passed around explicitly, there is no global instance.
///
/// Persisted as `settings.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdeConfig {
    #[serde(default)]
    pub keybind_config: KeybindConfig,

    #[serde(default)]
    pub draw_mode: DrawMode,
}

impl IdeConfig {
    pub const FILE_NAME: &'static str = "settings.toml";

    pub fn config_dir() -> Option<PathBuf> {
        PROJECT_DIRS.as_ref().map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(Self::FILE_NAME))
    }

    pub fn from_toml_str(txt: &str) -> Result<Self> {
        Ok(toml::from_str(txt)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)?;
        Self::from_toml_str(&txt)
    }

    pub fn store_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Loads the stored settings, falling back to defaults when there are none
    /// or they can't be read.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Error reading settings {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn key_to_index(&self, key: &str) -> Option<PaletteIndex> {
        self.keybind_config.key_to_index(key)
    }

    pub fn index_to_key(&self, index: PaletteIndex) -> &'static str {
        self.keybind_config.index_to_key(index)
    }
}
