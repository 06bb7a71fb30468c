//! Sampling and field composition over two-body potentials.
//!
//! Builds 2D `(x, y, z)` sample grids from a potential field, where `z` is a
//! presentation-ready compression of the raw potential, and derives the
//! contour levels and triangle meshes consumed by the plotting and export
//! layers.

use std::f64::consts::PI;

use roche_core::constants::G;
use roche_core::grid::Grid2;
use roche_core::polar::polar_to_cart;
use roche_lagrangian::{LagrangePoint, RocheLagrangian};
use thiserror::Error;

/// Multiplier keeping the L4/L5 contour off the exact saddle value.
const SADDLE_EPSILON: f64 = 1.0001;

/// Errors surfaced while composing sample grids.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("sample resolution must be positive")]
    InvalidResolution,
    #[error("sampling radius must be positive, got {0}")]
    InvalidRadius(f64),
    #[error("grid contains no finite samples")]
    EmptyGrid,
}

/// Capability interface over a scalar potential in the orbital plane.
///
/// Variants are selected by construction: `RocheLagrangian` for the rotating
/// two-body frame, `GravitationalPotentialField` for a single point mass.
pub trait PotentialField {
    /// Rescale a nondimensional coordinate to physical units.
    fn adjust_coordinate(&self, value: f64) -> f64;

    /// Raw potential at nondimensional `(x, y)`.
    fn potential_at(&self, x: f64, y: f64) -> f64;
}

impl PotentialField for RocheLagrangian {
    fn adjust_coordinate(&self, value: f64) -> f64 {
        self.adjust(value)
    }

    fn potential_at(&self, x: f64, y: f64) -> f64 {
        self.pair.potential(x, y)
    }
}

/// Point-mass field with an optional body-radius floor.
///
/// The field is clamped to `floor` inside the body radius (and at the
/// singular origin) so sampled grids stay finite.
#[derive(Debug, Clone)]
pub struct GravitationalPotentialField {
    pub mass_kg: f64,
    pub body_radius_km: Option<f64>,
    /// Fixed display scale applied to sample coordinates.
    pub display_scale_km: f64,
    /// Value returned inside the body radius.
    pub floor: f64,
}

impl GravitationalPotentialField {
    /// Field for a single body, with the default display scale and floor.
    pub fn new(mass_kg: f64, body_radius_km: Option<f64>) -> Self {
        Self {
            mass_kg,
            body_radius_km,
            display_scale_km: 5e7,
            floor: 1e-9,
        }
    }
}

impl PotentialField for GravitationalPotentialField {
    fn adjust_coordinate(&self, value: f64) -> f64 {
        value * self.display_scale_km
    }

    fn potential_at(&self, x: f64, y: f64) -> f64 {
        let x_km = self.adjust_coordinate(x);
        let y_km = self.adjust_coordinate(y);
        let dist = x_km.hypot(y_km);
        if dist == 0.0 || self.body_radius_km.is_some_and(|r| dist <= r) {
            return self.floor;
        }
        -G * self.mass_kg / dist.powi(2)
    }
}

/// How the potential field is discretized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Radius x angle sampling converted to cartesian (the default).
    Polar,
    /// Evenly spaced symmetric cartesian axes.
    Cartesian,
}

/// Controls for `sample_field`.
#[derive(Debug, Clone)]
pub struct SamplingConfig {
    /// Nominal resolution; the polar angle axis is additionally scaled by pi.
    pub points: usize,
    /// Outer radius bound; `None` keeps the default window.
    pub radius: Option<f64>,
    /// Inner radius bound, used only when `radius` is set.
    pub radius_floor: f64,
    pub mode: SamplingMode,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            points: 1024,
            radius: None,
            radius_floor: 0.0,
            mode: SamplingMode::Polar,
        }
    }
}

/// Three same-shaped planes of sample coordinates and compressed potential.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    pub x: Grid2,
    pub y: Grid2,
    pub z: Grid2,
}

impl SampleGrid {
    /// Number of grid rows.
    pub fn rows(&self) -> usize {
        self.z.rows()
    }

    /// Number of grid columns.
    pub fn cols(&self) -> usize {
        self.z.cols()
    }

    /// Rescale the coordinate planes to physical units; `z` stays a
    /// dimensionless presentation value.
    pub fn adjust_coordinates<F: PotentialField>(&self, field: &F) -> SampleGrid {
        SampleGrid {
            x: self.x.map(|v| field.adjust_coordinate(v)),
            y: self.y.map(|v| field.adjust_coordinate(v)),
            z: self.z.clone(),
        }
    }

    /// Apply a surface presentation transform to the `z` plane.
    pub fn with_surface(&self, transform: &SurfaceTransform) -> SampleGrid {
        SampleGrid {
            x: self.x.clone(),
            y: self.y.clone(),
            z: self.z.map(|v| transform.apply(v)),
        }
    }

    /// Mirror the `z` plane, producing the lower sheet of a surface.
    pub fn mirrored_z(&self) -> SampleGrid {
        SampleGrid {
            x: self.x.clone(),
            y: self.y.clone(),
            z: self.z.map(|v| -v),
        }
    }
}

/// Double-log compression flattening the huge dynamic range near the masses.
///
/// Only meaningful for `|v| > 1`; smaller magnitudes compress to NaN and are
/// treated as excluded cells downstream.
#[inline]
pub fn double_log_compression(v: f64) -> f64 {
    v.abs().log10().log10()
}

/// Sample a potential field into a 2D grid with compressed `z` values.
///
/// Cells where the potential is undefined (at a mass location) come back as
/// NaN rather than poisoning neighbours; consumers skip non-finite cells.
pub fn sample_field<F: PotentialField>(
    field: &F,
    config: &SamplingConfig,
) -> Result<SampleGrid, FieldError> {
    if config.points == 0 {
        return Err(FieldError::InvalidResolution);
    }
    if let Some(radius) = config.radius {
        if !(radius > 0.0) {
            return Err(FieldError::InvalidRadius(radius));
        }
    }

    match config.mode {
        SamplingMode::Polar => Ok(sample_polar(field, config)),
        SamplingMode::Cartesian => Ok(sample_cartesian(field, config)),
    }
}

fn sample_polar<F: PotentialField>(field: &F, config: &SamplingConfig) -> SampleGrid {
    // Angle count scaled by pi to keep angular and radial density comparable.
    let n_angles = (config.points as f64 * PI) as usize;
    let n_radii = config.points;

    let (start, end) = match config.radius {
        Some(radius) => (config.radius_floor, radius),
        None => (0.75, PI / 2.5),
    };

    // Full turn plus a small overlap so the wrap-around seam closes.
    let extra = 2.0 * PI / n_angles as f64 + 0.01;
    let angles = linspace_open(0.0, 2.0 * PI + extra, n_angles);
    let radii = linspace(start, end, n_radii);

    let x = Grid2::from_fn(n_angles, n_radii, |r, c| polar_to_cart(angles[r], radii[c]).0);
    let y = Grid2::from_fn(n_angles, n_radii, |r, c| polar_to_cart(angles[r], radii[c]).1);
    let z = compress_plane(field, &x, &y);

    SampleGrid { x, y, z }
}

fn sample_cartesian<F: PotentialField>(field: &F, config: &SamplingConfig) -> SampleGrid {
    let depth = 3.0 * PI / 4.0;
    let axis = linspace(-3.0 * depth, 3.0 * depth, config.points);

    let n = config.points;
    let x = Grid2::from_fn(n, n, |_, c| axis[c]);
    let y = Grid2::from_fn(n, n, |r, _| axis[r]);
    let z = compress_plane(field, &x, &y);

    SampleGrid { x, y, z }
}

fn compress_plane<F: PotentialField>(field: &F, x: &Grid2, y: &Grid2) -> Grid2 {
    Grid2::from_fn(x.rows(), x.cols(), |r, c| {
        let phi = field.potential_at(x.get(r, c), y.get(r, c));
        if phi.is_finite() {
            double_log_compression(phi)
        } else {
            f64::NAN
        }
    })
}

/// Presentation transform flattening a compressed field into a renderable
/// sheet: clamp to `limit`, scale, shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    pub scale: f64,
    pub limit: f64,
    pub offset: f64,
}

impl Default for SurfaceTransform {
    fn default() -> Self {
        Self {
            scale: -1.5,
            limit: 0.5,
            offset: -0.725,
        }
    }
}

impl SurfaceTransform {
    #[inline]
    pub fn apply(&self, z: f64) -> f64 {
        self.scale * z.min(self.limit) + self.offset
    }
}

/// A contour line: compressed-potential value plus display label and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourLevel {
    pub value: f64,
    pub label: &'static str,
    pub color: &'static str,
}

/// The five reference contour levels of a sampled Roche field, ascending.
///
/// Labels and colors stay attached to their level through the sort, so the
/// same level is always drawn in the same color.
pub fn contour_levels(
    system: &RocheLagrangian,
    grid: &SampleGrid,
) -> Result<Vec<ContourLevel>, FieldError> {
    let floor = grid.z.finite_min().ok_or(FieldError::EmptyGrid)?;

    let mut levels = vec![
        ContourLevel {
            value: floor,
            label: "floor",
            color: "white",
        },
        ContourLevel {
            value: double_log_compression(system.point(LagrangePoint::L1).phi),
            label: "L1",
            color: "red",
        },
        ContourLevel {
            value: double_log_compression(system.point(LagrangePoint::L2).phi),
            label: "L2",
            color: "blue",
        },
        ContourLevel {
            value: double_log_compression(system.point(LagrangePoint::L3).phi),
            label: "L3",
            color: "green",
        },
        ContourLevel {
            value: double_log_compression(system.point(LagrangePoint::L4).phi * SADDLE_EPSILON),
            label: "L4/L5",
            color: "cyan",
        },
    ];
    levels.sort_by(|a, b| a.value.total_cmp(&b.value));
    Ok(levels)
}

/// A mesh triangle with a per-face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTriangle {
    pub normal: [f32; 3],
    pub vertices: [[f32; 3]; 3],
}

/// Triangulate a sampled height field, two triangles per grid cell.
///
/// Cells with a non-finite corner are skipped, as are degenerate faces.
pub fn triangulate(grid: &SampleGrid) -> Vec<MeshTriangle> {
    let mut triangles = Vec::new();
    if grid.rows() < 2 || grid.cols() < 2 {
        return triangles;
    }

    let vertex = |r: usize, c: usize| -> [f64; 3] {
        [grid.x.get(r, c), grid.y.get(r, c), grid.z.get(r, c)]
    };

    for r in 0..grid.rows() - 1 {
        for c in 0..grid.cols() - 1 {
            let p00 = vertex(r, c);
            let p01 = vertex(r, c + 1);
            let p11 = vertex(r + 1, c + 1);
            let p10 = vertex(r + 1, c);
            if [p00, p01, p11, p10]
                .iter()
                .any(|p| p.iter().any(|v| !v.is_finite()))
            {
                continue;
            }
            if let Some(t) = face(p00, p01, p11) {
                triangles.push(t);
            }
            if let Some(t) = face(p00, p11, p10) {
                triangles.push(t);
            }
        }
    }
    triangles
}

fn face(p1: [f64; 3], p2: [f64; 3], p3: [f64; 3]) -> Option<MeshTriangle> {
    let v1 = [p2[0] - p1[0], p2[1] - p1[1], p2[2] - p1[2]];
    let v2 = [p3[0] - p1[0], p3[1] - p1[1], p3[2] - p1[2]];
    let cross = [
        v1[1] * v2[2] - v1[2] * v2[1],
        v1[2] * v2[0] - v1[0] * v2[2],
        v1[0] * v2[1] - v1[1] * v2[0],
    ];
    let norm = (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt();
    if !(norm > 0.0) {
        return None;
    }

    let normal = [
        (cross[0] / norm) as f32,
        (cross[1] / norm) as f32,
        (cross[2] / norm) as f32,
    ];
    let as_f32 = |p: [f64; 3]| [p[0] as f32, p[1] as f32, p[2] as f32];
    Some(MeshTriangle {
        normal,
        vertices: [as_f32(p1), as_f32(p2), as_f32(p3)],
    })
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Evenly spaced values over `[start, end)`, endpoint excluded.
fn linspace_open(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / n as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}
