use std::fs;
use std::io::Write;

use roche_viz::config::{self, BodyConfig};

#[test]
fn builtin_catalog_pairs_moon_with_earth() {
    let bodies = config::builtin_catalog();
    let moon = config::find_body(&bodies, "moon").expect("moon");
    assert_eq!(moon.name, "Moon");
    assert!((moon.semimajor_km - 384_400.0).abs() < 1e-6);

    let parent = config::parent_of(&bodies, moon).expect("parent");
    assert_eq!(parent.name, "Earth");
    assert!(parent.mass_kg > moon.mass_kg);
}

#[test]
fn builtin_catalog_lists_all_planets_under_the_sun() {
    let bodies = config::builtin_catalog();
    let planets: Vec<&BodyConfig> = bodies
        .iter()
        .filter(|b| b.parent.as_deref() == Some("Sun"))
        .collect();
    assert_eq!(planets.len(), 9);
    for planet in planets {
        assert!(planet.semimajor_km > 0.0, "{}", planet.name);
        assert!(planet.mass_kg > 0.0, "{}", planet.name);
    }
}

#[test]
fn shipped_catalog_file_matches_builtin_moon() {
    let bodies = config::load_bodies("configs/bodies.yaml").expect("catalog file");
    assert_eq!(bodies.len(), 11);
    let moon = config::find_body(&bodies, "Moon").expect("moon");
    assert!((moon.semimajor_km - 384_400.0).abs() < 1e-6);
    assert_eq!(moon.parent.as_deref(), Some("Earth"));
}

#[test]
fn yaml_catalog_loads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bodies.yaml");
    let mut file = fs::File::create(&path).expect("create yaml");
    writeln!(
        file,
        "- name: Alpha\n  mass_kg: 2.0e30\n  radius_km: 700000.0\n  semimajor_km: 0.0\n- name: Beta\n  mass_kg: 6.0e24\n  radius_km: 6000.0\n  semimajor_km: 1.5e8\n  parent: Alpha"
    )
    .expect("write yaml");

    let bodies = config::load_bodies(&path).expect("load");
    assert_eq!(bodies.len(), 2);
    let beta = config::find_body(&bodies, "BETA").expect("beta");
    let parent = config::parent_of(&bodies, beta).expect("alpha");
    assert_eq!(parent.name, "Alpha");
}

#[test]
fn toml_directory_loads_one_body_per_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gamma.toml");
    fs::write(
        &path,
        "name = \"Gamma\"\nmass_kg = 1.0e24\nradius_km = 2500.0\nsemimajor_km = 5.0e7\nparent = \"Alpha\"\n",
    )
    .expect("write toml");

    let bodies = config::load_bodies(dir.path()).expect("load dir");
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].name, "Gamma");
    assert_eq!(bodies[0].parent.as_deref(), Some("Alpha"));
}

#[test]
fn missing_catalog_path_reports_io_error() {
    let err = config::load_bodies("does/not/exist.yaml").unwrap_err();
    assert!(matches!(err, config::ConfigError::Io(_)));
}
