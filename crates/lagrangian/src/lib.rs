//! Lagrange point solver and Roche effective potential for a two-body system.
//!
//! Works in nondimensional units where the two masses sit on the x-axis with
//! unit separation; `RocheLagrangian` rescales coordinates back to physical
//! units for a concrete `(m1, m2, dist)` triple.

use thiserror::Error;

/// Absolute bracket width at which the collinear bisection stops.
const BRACKET_TOLERANCE: f64 = 1e-10;

/// Errors surfaced by mass-pair construction and the root search.
#[derive(Debug, Error)]
pub enum LagrangianError {
    #[error("mass must be positive, got {0} kg")]
    NonPositiveMass(f64),
    #[error("separation must be positive, got {0} km")]
    NonPositiveSeparation(f64),
    #[error("potential derivative does not change sign over [{x_low}, {x_up}]")]
    NoRootInBracket { x_low: f64, x_up: f64 },
}

/// One of the five equilibrium points of the rotating two-body frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LagrangePoint {
    L1,
    L2,
    L3,
    L4,
    L5,
}

impl LagrangePoint {
    /// All five points in canonical order.
    pub const ALL: [LagrangePoint; 5] = [
        LagrangePoint::L1,
        LagrangePoint::L2,
        LagrangePoint::L3,
        LagrangePoint::L4,
        LagrangePoint::L5,
    ];

    /// Display label for plots and printouts.
    pub fn label(self) -> &'static str {
        match self {
            LagrangePoint::L1 => "L1",
            LagrangePoint::L2 => "L2",
            LagrangePoint::L3 => "L3",
            LagrangePoint::L4 => "L4",
            LagrangePoint::L5 => "L5",
        }
    }

    fn index(self) -> usize {
        match self {
            LagrangePoint::L1 => 0,
            LagrangePoint::L2 => 1,
            LagrangePoint::L3 => 2,
            LagrangePoint::L4 => 3,
            LagrangePoint::L5 => 4,
        }
    }
}

/// Two masses normalized to nondimensional positions with unit separation.
///
/// The mass ratio is taken as `max/min` so it is always >= 1; the heavier
/// body lands at `x1` (negative, near the origin) and the lighter at `x2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassPair {
    pub m1_kg: f64,
    pub m2_kg: f64,
    /// Heavier-over-lighter mass ratio, >= 1 by construction.
    pub mass_ratio: f64,
    /// Nondimensional position of the heavier mass, `-1/(q+1)`.
    pub x1: f64,
    /// Nondimensional position of the lighter mass, `q/(q+1)`.
    pub x2: f64,
}

impl MassPair {
    /// Normalize a pair of masses. Rejects non-positive inputs.
    pub fn new(m1_kg: f64, m2_kg: f64) -> Result<Self, LagrangianError> {
        if !(m1_kg > 0.0) {
            return Err(LagrangianError::NonPositiveMass(m1_kg));
        }
        if !(m2_kg > 0.0) {
            return Err(LagrangianError::NonPositiveMass(m2_kg));
        }

        // q < 1 does not converge with the fixed brackets below, so the
        // ratio is always formed heavier-over-lighter.
        let q = if m1_kg > m2_kg {
            m1_kg / m2_kg
        } else {
            m2_kg / m1_kg
        };

        Ok(Self {
            m1_kg,
            m2_kg,
            mass_ratio: q,
            x1: -1.0 / (q + 1.0),
            x2: q / (q + 1.0),
        })
    }

    /// Roche effective potential at `(x, y)` in nondimensional units.
    ///
    /// Undefined at the mass locations themselves; evaluating there yields a
    /// non-finite value which callers are expected to exclude.
    pub fn potential(&self, x: f64, y: f64) -> f64 {
        -self.x2 / ((x - self.x1).powi(2) + y.powi(2)).sqrt()
            + self.x1 / ((x - self.x2).powi(2) + y.powi(2)).sqrt()
            - 0.5 * (x.powi(2) + y.powi(2))
    }

    /// Analytic x-derivative of the potential along the y = 0 axis.
    pub fn potential_x_derivative(&self, x: f64) -> f64 {
        self.x2 / (x - self.x1).powi(2) * (x - self.x1).signum()
            - self.x1 / (x - self.x2).powi(2) * (x - self.x2).signum()
            - x
    }

    /// Bisect the derivative over `[x_low, x_up]` down to `1e-10` width.
    ///
    /// The bracket must straddle a sign change of the derivative; brackets
    /// that do not are rejected instead of converging to a wrong answer.
    pub fn collinear_root(&self, x_low: f64, x_up: f64) -> Result<f64, LagrangianError> {
        let d_low = self.potential_x_derivative(x_low);
        let d_up = self.potential_x_derivative(x_up);
        if d_low.signum() == d_up.signum() {
            return Err(LagrangianError::NoRootInBracket { x_low, x_up });
        }

        let (mut low, mut up) = (x_low, x_up);
        let mut mid = 0.5 * (low + up);
        while (low - up).abs() > BRACKET_TOLERANCE {
            mid = 0.5 * (low + up);
            if self.potential_x_derivative(mid) > 0.0 {
                low = mid;
            } else {
                up = mid;
            }
        }
        Ok(mid)
    }

    /// Nondimensional coordinates of a Lagrange point.
    ///
    /// L1-L3 are found by bisection over fixed brackets; the anchors assume
    /// the `q >= 1` normalization, which keeps `x2` near +1. L4/L5 are the
    /// equilateral-triangle points and need no search.
    pub fn lagrange_coords(&self, which: LagrangePoint) -> Result<(f64, f64), LagrangianError> {
        match which {
            LagrangePoint::L1 => Ok((self.collinear_root(self.x1 * 0.99, self.x2 * 0.99)?, 0.0)),
            LagrangePoint::L2 => Ok((self.collinear_root(self.x2 * 1.01, 2.0)?, 0.0)),
            LagrangePoint::L3 => Ok((self.collinear_root(-2.0, self.x1 * 1.01)?, 0.0)),
            LagrangePoint::L4 => Ok((
                0.5 * (self.x1 + self.x2),
                3.0_f64.sqrt() / 2.0 * (self.x1 - self.x2).abs(),
            )),
            LagrangePoint::L5 => Ok((
                0.5 * (self.x1 + self.x2),
                -(3.0_f64.sqrt() / 2.0 * (self.x1 - self.x2).abs()),
            )),
        }
    }
}

/// A solved Lagrange point: physical coordinates plus the (dimensionless)
/// potential at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagrangePointSolution {
    pub point: LagrangePoint,
    pub x_km: f64,
    pub y_km: f64,
    pub phi: f64,
}

/// A fully resolved two-body system: normalized masses, physical separation,
/// barycentric mass placement, and the five solved Lagrange points.
///
/// Immutable after construction and safe to read from multiple threads.
#[derive(Debug, Clone, PartialEq)]
pub struct RocheLagrangian {
    pub pair: MassPair,
    pub dist_km: f64,
    /// Barycenter offset from the first mass, `dist * m2 / (m1 + m2)`.
    pub barycenter_km: f64,
    /// Physical position of the first input mass (barycentric frame).
    pub m1_xy_km: (f64, f64),
    /// Physical position of the second input mass (barycentric frame).
    pub m2_xy_km: (f64, f64),
    points: [LagrangePointSolution; 5],
}

impl RocheLagrangian {
    /// Resolve a system from two masses and their center-to-center distance.
    pub fn new(m1_kg: f64, m2_kg: f64, dist_km: f64) -> Result<Self, LagrangianError> {
        if !(dist_km > 0.0) {
            return Err(LagrangianError::NonPositiveSeparation(dist_km));
        }
        let pair = MassPair::new(m1_kg, m2_kg)?;

        let barycenter_km = dist_km * m2_kg / (m1_kg + m2_kg);
        let m1_xy_km = (-barycenter_km, 0.0);
        let m2_xy_km = (dist_km - barycenter_km, 0.0);

        let mut points = [LagrangePointSolution {
            point: LagrangePoint::L1,
            x_km: 0.0,
            y_km: 0.0,
            phi: 0.0,
        }; 5];
        for which in LagrangePoint::ALL {
            let (x, y) = pair.lagrange_coords(which)?;
            points[which.index()] = LagrangePointSolution {
                point: which,
                x_km: x * dist_km,
                y_km: y * dist_km,
                phi: pair.potential(x, y),
            };
        }

        Ok(Self {
            pair,
            dist_km,
            barycenter_km,
            m1_xy_km,
            m2_xy_km,
            points,
        })
    }

    /// Rescale a nondimensional coordinate to physical units.
    #[inline]
    pub fn adjust(&self, a: f64) -> f64 {
        a * self.dist_km
    }

    /// The solved point for `which`.
    pub fn point(&self, which: LagrangePoint) -> &LagrangePointSolution {
        &self.points[which.index()]
    }

    /// All five solved points in canonical order.
    pub fn points(&self) -> &[LagrangePointSolution; 5] {
        &self.points
    }
}
