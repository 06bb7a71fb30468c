//! Body catalog models and loaders.
//!
//! Ships a built-in read-only solar system table and accepts user catalogs
//! from YAML files or directories of TOML manifests.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Catalog entry for a celestial body.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub mass_kg: f64,
    pub radius_km: f64,
    /// Semi-major axis of the orbit around `parent` (km); zero for the Sun.
    pub semimajor_km: f64,
    #[serde(default)]
    pub parent: Option<String>,
}

/// Errors that can occur while loading catalog files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The built-in read-only catalog: the Sun, the eight planets, Pluto, and
/// the Moon. Masses in kg, radii and semi-major axes in km.
pub fn builtin_catalog() -> Vec<BodyConfig> {
    let body = |name: &str, mass_kg: f64, radius_km: f64, semimajor_km: f64, parent: Option<&str>| {
        BodyConfig {
            name: name.to_string(),
            mass_kg,
            radius_km,
            semimajor_km,
            parent: parent.map(|p| p.to_string()),
        }
    };

    vec![
        body("Sun", 1.9884e30, 695_700.0, 0.0, None),
        body("Mercury", 0.33010e24, 2_439.7, 57.909e6, Some("Sun")),
        body("Venus", 4.8673e24, 6_051.8, 108.210e6, Some("Sun")),
        body("Earth", 5.974e24, 6_371.0, 149.59887e6, Some("Sun")),
        body("Mars", 0.64169e24, 3_389.5, 227.956e6, Some("Sun")),
        body("Jupiter", 1_898.13e24, 71_492.0, 778.479e6, Some("Sun")),
        body("Saturn", 568.32e24, 58_232.0, 1_432.041e6, Some("Sun")),
        body("Uranus", 86.811e24, 25_362.0, 2_867.043e6, Some("Sun")),
        body("Neptune", 102.409e24, 24_622.0, 4_514.953e6, Some("Sun")),
        body("Pluto", 0.01303e24, 1_188.0, 5_869.656e6, Some("Sun")),
        body("Moon", 0.007348e24, 1_737.4, 384_400.0, Some("Earth")),
    ]
}

/// Load body configurations from a YAML file, a TOML file, or a directory
/// of TOML manifests.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    load_records(path)
}

/// Case-insensitive catalog lookup by body name.
pub fn find_body<'a>(bodies: &'a [BodyConfig], name: &str) -> Option<&'a BodyConfig> {
    let upper = name.to_uppercase();
    bodies.iter().find(|body| body.name.to_uppercase() == upper)
}

/// Resolve the primary a body orbits, if the catalog knows it.
pub fn parent_of<'a>(bodies: &'a [BodyConfig], body: &BodyConfig) -> Option<&'a BodyConfig> {
    body.parent
        .as_deref()
        .and_then(|parent| find_body(bodies, parent))
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
