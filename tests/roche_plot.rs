use assert_cmd::Command;
use roche_viz::export::landmarks;
use std::fs::{self, File};
use std::io::Write;

#[test]
fn plot_bin_renders_png_from_grid_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("grid.csv");
    let json_path = dir.path().join("landmarks.json");
    let png_path = dir.path().join("roche.png");

    // Small rectangular grid with a bowl-shaped field.
    let mut file = File::create(&csv_path).expect("csv create");
    writeln!(file, "row,col,x_km,y_km,z").unwrap();
    let n = 6;
    for row in 0..n {
        for col in 0..n {
            let x = -1.0 + 2.0 * col as f64 / (n - 1) as f64;
            let y = -1.0 + 2.0 * row as f64 / (n - 1) as f64;
            let z = x * x + y * y;
            writeln!(file, "{row},{col},{x:.6},{y:.6},{z:.9}").unwrap();
        }
    }

    let sidecar = landmarks::Sidecar {
        m1_kg: 2.0,
        m2_kg: 1.0,
        dist_km: 1.0,
        barycenter_km: 1.0 / 3.0,
        m1_xy_km: (-1.0 / 3.0, 0.0),
        m2_xy_km: (2.0 / 3.0, 0.0),
        points: vec![landmarks::PointRecord {
            name: "L1".to_string(),
            x_km: 0.2,
            y_km: 0.0,
            phi: -2.0,
        }],
        levels: vec![
            landmarks::LevelRecord {
                label: "floor".to_string(),
                value: 0.1,
                color: "white".to_string(),
            },
            landmarks::LevelRecord {
                label: "L1".to_string(),
                value: 0.5,
                color: "red".to_string(),
            },
            landmarks::LevelRecord {
                label: "L4/L5".to_string(),
                value: 1.5,
                color: "cyan".to_string(),
            },
        ],
    };
    landmarks::write_sidecar(&json_path, &sidecar).expect("sidecar");

    Command::cargo_bin("roche_plot")
        .expect("roche_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--landmarks",
            json_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "400",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(&png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn plot_bin_skips_non_finite_cells() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("grid.csv");
    let png_path = dir.path().join("roche.png");

    let mut file = File::create(&csv_path).expect("csv create");
    writeln!(file, "row,col,x_km,y_km,z").unwrap();
    for row in 0..4 {
        for col in 0..4 {
            let z = if row == 1 && col == 1 {
                "NaN".to_string()
            } else {
                format!("{:.6}", (row + col) as f64)
            };
            writeln!(file, "{row},{col},{}.0,{}.0,{z}", col, row).unwrap();
        }
    }

    Command::cargo_bin("roche_plot")
        .expect("roche_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "200",
            "--height",
            "200",
        ])
        .assert()
        .success();

    assert!(fs::metadata(&png_path).expect("png metadata").len() > 0);
}

#[test]
fn plot_bin_fails_on_empty_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("grid.csv");
    fs::write(&csv_path, "row,col,x_km,y_km,z\n").expect("csv");

    Command::cargo_bin("roche_plot")
        .expect("roche_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            dir.path().join("out.png").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("No samples"));
}
