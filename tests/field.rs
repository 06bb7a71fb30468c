use std::f64::consts::PI;

use roche_viz::field::{
    self, ContourLevel, FieldError, GravitationalPotentialField, PotentialField, SampleGrid,
    SamplingConfig, SamplingMode, SurfaceTransform, double_log_compression,
};
use roche_viz::grid::Grid2;
use roche_viz::lagrangian::RocheLagrangian;
use roche_viz::polar::{cart_to_polar, polar_to_cart};

const EARTH_KG: f64 = 5.974e24;
const MOON_KG: f64 = 7.348e22;
const EARTH_MOON_KM: f64 = 384_400.0;

fn earth_moon() -> RocheLagrangian {
    RocheLagrangian::new(EARTH_KG, MOON_KG, EARTH_MOON_KM).expect("system")
}

#[test]
fn polar_conversion_round_trips() {
    for &angle in &[0.0, 0.4, PI / 2.0, 2.0, 3.9, 5.5] {
        for &radius in &[0.75, 1.0, 1.725] {
            let (x, y) = polar_to_cart(angle, radius);
            let (back_angle, back_radius) = cart_to_polar(x, y);
            let wrapped = back_angle.rem_euclid(2.0 * PI);
            assert!((wrapped - angle).abs() < 1e-12, "angle {angle}");
            assert!((back_radius - radius).abs() < 1e-12, "radius {radius}");
        }
    }
}

#[test]
fn polar_grid_has_pi_scaled_angle_axis() {
    let system = earth_moon();
    let config = SamplingConfig {
        points: 10,
        ..SamplingConfig::default()
    };
    let grid = field::sample_field(&system, &config).expect("grid");
    assert_eq!(grid.rows(), (10.0 * PI) as usize);
    assert_eq!(grid.cols(), 10);
}

#[test]
fn polar_seam_overlap_closes_the_wraparound() {
    let system = earth_moon();
    let config = SamplingConfig {
        points: 24,
        ..SamplingConfig::default()
    };
    let grid = field::sample_field(&system, &config).expect("grid");
    let last = grid.rows() - 1;
    for col in 0..grid.cols() {
        let dx = grid.x.get(0, col) - grid.x.get(last, col);
        let dy = grid.y.get(0, col) - grid.y.get(last, col);
        let gap = dx.hypot(dy);
        assert!(gap < 0.05, "seam gap {gap} at col {col}");
    }
}

#[test]
fn cartesian_grid_spans_symmetric_range() {
    let system = earth_moon();
    let config = SamplingConfig {
        points: 5,
        mode: SamplingMode::Cartesian,
        ..SamplingConfig::default()
    };
    let grid = field::sample_field(&system, &config).expect("grid");
    assert_eq!(grid.rows(), 5);
    assert_eq!(grid.cols(), 5);

    let depth = 3.0 * PI / 4.0;
    assert!((grid.x.get(0, 0) + 3.0 * depth).abs() < 1e-12);
    assert!((grid.x.get(0, 4) - 3.0 * depth).abs() < 1e-12);
    assert!((grid.x.get(0, 0) + grid.x.get(0, 4)).abs() < 1e-12);
    assert!((grid.y.get(0, 0) + grid.y.get(4, 0)).abs() < 1e-12);
    // Center cell sits between the masses where the potential is defined.
    assert!(grid.z.values().any(|v| v.is_finite()));
}

#[test]
fn sampling_rejects_bad_inputs() {
    let system = earth_moon();
    let zero_points = SamplingConfig {
        points: 0,
        ..SamplingConfig::default()
    };
    assert!(matches!(
        field::sample_field(&system, &zero_points),
        Err(FieldError::InvalidResolution)
    ));

    let bad_radius = SamplingConfig {
        radius: Some(-1.0),
        ..SamplingConfig::default()
    };
    assert!(matches!(
        field::sample_field(&system, &bad_radius),
        Err(FieldError::InvalidRadius(_))
    ));
}

#[test]
fn double_log_compression_flattens_magnitudes() {
    let compressed = double_log_compression(-100.0);
    assert!((compressed - 2.0_f64.log10()).abs() < 1e-12);
    // Monotonic over the magnitudes the sampler produces.
    assert!(double_log_compression(-10.0) < double_log_compression(-1000.0));
}

#[test]
fn surface_transform_clamps_above_limit() {
    let transform = SurfaceTransform::default();
    let clamped = transform.apply(0.5);
    assert!((transform.apply(2.0) - clamped).abs() < 1e-12);
    assert!((transform.apply(10.0) - clamped).abs() < 1e-12);
    assert!((transform.apply(0.0) - (-0.725)).abs() < 1e-12);
    // Below the limit the transform stays affine.
    assert!(transform.apply(-1.0) > transform.apply(0.0));
}

#[test]
fn contour_levels_are_sorted_and_complete() {
    let system = earth_moon();
    let config = SamplingConfig {
        points: 32,
        ..SamplingConfig::default()
    };
    let grid = field::sample_field(&system, &config).expect("grid");
    let levels = field::contour_levels(&system, &grid).expect("levels");

    assert_eq!(levels.len(), 5);
    for pair in levels.windows(2) {
        assert!(pair[0].value <= pair[1].value);
    }
    let mut labels: Vec<&str> = levels.iter().map(|l: &ContourLevel| l.label).collect();
    labels.sort();
    assert_eq!(labels, vec!["L1", "L2", "L3", "L4/L5", "floor"]);
}

#[test]
fn contour_levels_need_finite_samples() {
    let system = earth_moon();
    let nan_grid = SampleGrid {
        x: Grid2::filled(2, 2, 0.0),
        y: Grid2::filled(2, 2, 0.0),
        z: Grid2::filled(2, 2, f64::NAN),
    };
    assert!(matches!(
        field::contour_levels(&system, &nan_grid),
        Err(FieldError::EmptyGrid)
    ));
}

#[test]
fn gravitational_field_floors_inside_the_body() {
    let sun = GravitationalPotentialField::new(1.9884e30, Some(695_700.0));
    assert!((sun.adjust_coordinate(1.0) - 5e7).abs() < 1e-6);
    // Inside the body radius the field is clamped to the floor value.
    assert!((sun.potential_at(0.0, 0.0) - 1e-9).abs() < 1e-18);
    assert!((sun.potential_at(695_000.0 / 5e7, 0.0) - 1e-9).abs() < 1e-18);
    // Outside it is attractive.
    assert!(sun.potential_at(0.5, 0.5) < 0.0);
}

#[test]
fn triangulation_covers_finite_cells_with_unit_normals() {
    let system = earth_moon();
    let config = SamplingConfig {
        points: 6,
        radius: Some(1.725),
        radius_floor: 0.5,
        mode: SamplingMode::Polar,
    };
    let grid = field::sample_field(&system, &config)
        .expect("grid")
        .with_surface(&SurfaceTransform::default());
    let triangles = field::triangulate(&grid);
    assert!(!triangles.is_empty());
    assert!(triangles.len() <= 2 * (grid.rows() - 1) * (grid.cols() - 1));
    for triangle in &triangles {
        let [nx, ny, nz] = triangle.normal;
        let norm = (nx * nx + ny * ny + nz * nz).sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "normal norm {norm}");
    }
}

#[test]
fn mirrored_sheet_negates_heights() {
    let system = earth_moon();
    let config = SamplingConfig {
        points: 4,
        ..SamplingConfig::default()
    };
    let grid = field::sample_field(&system, &config).expect("grid");
    let mirrored = grid.mirrored_z();
    for (a, b) in grid.z.values().zip(mirrored.z.values()) {
        if a.is_finite() {
            assert!((a + b).abs() < 1e-15);
        }
    }
    assert_eq!(grid.x, mirrored.x);
    assert_eq!(grid.y, mirrored.y);
}

#[test]
fn coordinate_adjustment_rescales_xy_only() {
    let system = earth_moon();
    let config = SamplingConfig {
        points: 4,
        ..SamplingConfig::default()
    };
    let grid = field::sample_field(&system, &config).expect("grid");
    let adjusted = grid.adjust_coordinates(&system);
    assert!((adjusted.x.get(0, 0) - grid.x.get(0, 0) * EARTH_MOON_KM).abs() < 1e-6);
    assert!((adjusted.y.get(1, 1) - grid.y.get(1, 1) * EARTH_MOON_KM).abs() < 1e-6);
    assert_eq!(adjusted.z, grid.z);
}
