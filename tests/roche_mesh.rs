use assert_cmd::Command;
use std::fs;

#[test]
fn mesh_bin_writes_consistent_binary_stl() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stl_path = dir.path().join("roche.stl");

    Command::cargo_bin("roche_mesh")
        .expect("roche_mesh bin")
        .args([
            "--m1",
            "5.974e24",
            "--m2",
            "7.348e22",
            "--dist",
            "384400",
            "--points",
            "8",
            "--output",
            stl_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&stl_path).expect("stl bytes");
    assert!(bytes.len() >= 84, "stl too small: {}", bytes.len());
    let count = u32::from_le_bytes(bytes[80..84].try_into().unwrap()) as usize;
    assert!(count > 0, "no triangles written");
    assert_eq!(bytes.len(), 84 + 50 * count);
}

#[test]
fn mesh_bin_resolves_catalog_bodies() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stl_path = dir.path().join("moon.stl");

    Command::cargo_bin("roche_mesh")
        .expect("roche_mesh bin")
        .args([
            "--body",
            "Moon",
            "--points",
            "6",
            "--output",
            stl_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(fs::metadata(&stl_path).expect("stl metadata").len() > 84);
}
