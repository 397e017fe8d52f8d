//! Configuration system for the cache simulator.
//!
//! This module defines the structures used to parameterize a run. It provides:
//! 1. **Defaults:** The modelled hardware (32 sets, 4 ways, 32-byte lines, 256 KiB memory).
//! 2. **Structures:** Policy mode, cache geometry and memory geometry.
//! 3. **Validation:** `Config::validate` turns a configuration into an [`AddressLayout`]
//!    or a [`ConfigError`] before any access is simulated.
//!
//! Configuration is read from JSON (`Config::from_file`) or built with `Config::default()`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::policies::Policy;
use crate::common::AddressLayout;
use crate::common::error::ConfigError;

/// Default configuration values.
mod defaults {
    use crate::common::constants;

    /// Sets per cache array.
    pub const SETS: usize = constants::CACHE_SETS;

    /// Ways per set.
    pub const WAYS: usize = constants::CACHE_WAYS;

    /// Bytes per line.
    pub const LINE_BYTES: usize = constants::CACHE_LINE_BYTES;

    /// Backing memory size (256 KiB).
    pub const MEMORY_SIZE: usize = constants::MEMORY_SIZE;

    /// Address width in bits.
    pub const ADDRESS_BITS: u32 = constants::ADDRESS_BITS;
}

/// Which replacement policies a run simulates.
///
/// Simulating both side by side is the default, so the two hit rates come
/// from the exact same access sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyMode {
    /// True LRU and pseudo-LRU in lockstep.
    #[default]
    #[serde(alias = "Both", alias = "both")]
    Both,
    /// True LRU only.
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// Pseudo-LRU only.
    #[serde(alias = "Plru", alias = "plru", alias = "pLRU")]
    Plru,
}

impl PolicyMode {
    /// Whether the true-LRU array is simulated.
    pub const fn lru_enabled(self) -> bool {
        matches!(self, Self::Both | Self::Lru)
    }

    /// Whether the pseudo-LRU array is simulated.
    pub const fn plru_enabled(self) -> bool {
        matches!(self, Self::Both | Self::Plru)
    }

    /// Enabled policies in report order.
    pub const fn policies(self) -> &'static [Policy] {
        match self {
            Self::Both => &[Policy::Lru, Policy::Plru],
            Self::Lru => &[Policy::Lru],
            Self::Plru => &[Policy::Plru],
        }
    }
}

impl FromStr for PolicyMode {
    type Err = ConfigError;

    /// Parses a mode name or its numeric code (`0` both, `1` LRU, `2` pseudo-LRU).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "both" => Ok(Self::Both),
            "1" | "lru" => Ok(Self::Lru),
            "2" | "plru" | "pseudo-lru" => Ok(Self::Plru),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Both => write!(f, "both"),
            Self::Lru => write!(f, "lru"),
            Self::Plru => write!(f, "plru"),
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{Config, PolicyMode};
///
/// let config = Config::default();
/// assert_eq!(config.mode, PolicyMode::Both);
/// assert_eq!(config.cache.ways, 4);
/// ```
///
/// Deserializing from JSON, with missing fields taking their defaults:
///
/// ```
/// use cachesim_core::config::{Config, PolicyMode};
///
/// let config = Config::from_json_str(r#"{ "mode": "PLRU", "cache": { "ways": 8 } }"#).unwrap();
/// assert_eq!(config.mode, PolicyMode::Plru);
/// assert_eq!(config.cache.ways, 8);
/// assert_eq!(config.cache.sets, 32);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Policies to simulate.
    #[serde(default)]
    pub mode: PolicyMode,
    /// Cache geometry.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Backing memory geometry.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks the geometry and derives the address layout.
    ///
    /// The tag receives whatever bits the index and offset leave, so the
    /// three fields always partition the address exactly.
    pub fn validate(&self) -> Result<AddressLayout, ConfigError> {
        let cache = &self.cache;
        let memory = &self.memory;

        if cache.sets == 0 {
            return Err(ConfigError::ZeroGeometry("cache.sets"));
        }
        if cache.ways == 0 {
            return Err(ConfigError::ZeroGeometry("cache.ways"));
        }
        if cache.line_bytes == 0 {
            return Err(ConfigError::ZeroGeometry("cache.line_bytes"));
        }
        if memory.size_bytes == 0 {
            return Err(ConfigError::ZeroGeometry("memory.size_bytes"));
        }
        if !cache.sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "cache.sets",
                value: cache.sets,
            });
        }
        if !cache.line_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "cache.line_bytes",
                value: cache.line_bytes,
            });
        }

        let index_bits = cache.sets.trailing_zeros();
        let offset_bits = cache.line_bytes.trailing_zeros();
        let address_bits = memory.address_bits;
        if address_bits > u32::BITS || index_bits + offset_bits >= address_bits {
            return Err(ConfigError::AddressWidth {
                address_bits,
                index_bits,
                offset_bits,
            });
        }

        if (memory.size_bytes as u64) > (1u64 << address_bits) {
            return Err(ConfigError::MemorySize {
                size: memory.size_bytes,
                reason: "exceeds the address space",
            });
        }
        if memory.size_bytes % cache.line_bytes != 0 {
            return Err(ConfigError::MemorySize {
                size: memory.size_bytes,
                reason: "is not a multiple of the line size",
            });
        }

        Ok(AddressLayout::new(
            address_bits - index_bits - offset_bits,
            index_bits,
            offset_bits,
        ))
    }
}

/// Geometry of one cache array.
///
/// Both policy arrays share this geometry; total capacity is
/// `sets * ways * line_bytes` bytes each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Number of sets (a power of two).
    #[serde(default = "CacheConfig::default_sets")]
    pub sets: usize,

    /// Associativity.
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Line size in bytes (a power of two).
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,
}

impl CacheConfig {
    fn default_sets() -> usize {
        defaults::SETS
    }

    fn default_ways() -> usize {
        defaults::WAYS
    }

    fn default_line() -> usize {
        defaults::LINE_BYTES
    }

    /// Capacity of one array in bytes.
    pub const fn size_bytes(&self) -> usize {
        self.sets * self.ways * self.line_bytes
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sets: defaults::SETS,
            ways: defaults::WAYS,
            line_bytes: defaults::LINE_BYTES,
        }
    }
}

/// Backing memory geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Memory size in bytes.
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,

    /// Width of a physical address in bits.
    #[serde(default = "MemoryConfig::default_address_bits")]
    pub address_bits: u32,
}

impl MemoryConfig {
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }

    fn default_address_bits() -> u32 {
        defaults::ADDRESS_BITS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
            address_bits: defaults::ADDRESS_BITS,
        }
    }
}
