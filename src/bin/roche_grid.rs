use clap::{Parser, ValueEnum};
use roche_viz::config::{self, BodyConfig};
use roche_viz::export::{grid, landmarks};
use roche_viz::field::{self, SamplingConfig, SamplingMode};
use roche_viz::lagrangian::RocheLagrangian;
use std::path::PathBuf;

/// Generate Roche field grid data (CSV) by sampling the potential around a
/// two-body system, plus an optional JSON landmark sidecar.
#[derive(Parser, Debug)]
#[command(author, version, about = "Roche potential grid CSV generator")]
struct Cli {
    /// Secondary body name (case-insensitive); pairs with its catalog parent
    #[arg(long, conflicts_with_all = ["m1", "m2", "dist"])]
    body: Option<String>,

    /// Catalog YAML file or TOML directory (defaults to the built-in table)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Primary mass in kg (explicit pair mode)
    #[arg(long, requires = "m2", requires = "dist")]
    m1: Option<f64>,

    /// Secondary mass in kg (explicit pair mode)
    #[arg(long, requires = "m1", requires = "dist")]
    m2: Option<f64>,

    /// Center-to-center distance in km (explicit pair mode)
    #[arg(long, requires = "m1", requires = "m2")]
    dist: Option<f64>,

    /// Nominal sample resolution
    #[arg(long, default_value_t = 500)]
    points: usize,

    /// Sampling mode
    #[arg(long, value_enum, default_value_t = Mode::Polar)]
    mode: Mode,

    /// Outer sampling radius bound (nondimensional)
    #[arg(long)]
    radius: Option<f64>,

    /// Inner radius bound, used together with --radius
    #[arg(long, default_value_t = 0.0)]
    limit: f64,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/roche_grid.csv")]
    output: PathBuf,

    /// Optional JSON landmark sidecar path
    #[arg(long)]
    landmarks: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Mode {
    Polar,
    Cart,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let bodies = load_catalog(cli.catalog.as_deref())?;
    let system = resolve_system(&cli, &bodies)?;

    let sampling = SamplingConfig {
        points: cli.points,
        radius: cli.radius,
        radius_floor: cli.limit,
        mode: match cli.mode {
            Mode::Polar => SamplingMode::Polar,
            Mode::Cart => SamplingMode::Cartesian,
        },
    };
    let sampled = field::sample_field(&system, &sampling)?;
    let levels = field::contour_levels(&system, &sampled)?;
    let adjusted = sampled.adjust_coordinates(&system);

    let mut writer = grid::writer_for_path(&cli.output)?;
    grid::write_header(writer.as_mut())?;
    for row in 0..adjusted.rows() {
        for col in 0..adjusted.cols() {
            grid::Record {
                row,
                col,
                x_km: adjusted.x.get(row, col),
                y_km: adjusted.y.get(row, col),
                z: adjusted.z.get(row, col),
            }
            .write_to(writer.as_mut())?;
        }
    }
    writer.flush()?;

    if let Some(path) = &cli.landmarks {
        let sidecar = landmarks::Sidecar {
            m1_kg: system.pair.m1_kg,
            m2_kg: system.pair.m2_kg,
            dist_km: system.dist_km,
            barycenter_km: system.barycenter_km,
            m1_xy_km: system.m1_xy_km,
            m2_xy_km: system.m2_xy_km,
            points: system
                .points()
                .iter()
                .map(|p| landmarks::PointRecord {
                    name: p.point.label().to_string(),
                    x_km: p.x_km,
                    y_km: p.y_km,
                    phi: p.phi,
                })
                .collect(),
            levels: levels
                .iter()
                .map(|l| landmarks::LevelRecord {
                    label: l.label.to_string(),
                    value: l.value,
                    color: l.color.to_string(),
                })
                .collect(),
        };
        landmarks::write_sidecar(path, &sidecar)?;
    }

    Ok(())
}

fn load_catalog(path: Option<&std::path::Path>) -> anyhow::Result<Vec<BodyConfig>> {
    match path {
        Some(path) => Ok(config::load_bodies(path)?),
        None => Ok(config::builtin_catalog()),
    }
}

fn resolve_system(cli: &Cli, bodies: &[BodyConfig]) -> anyhow::Result<RocheLagrangian> {
    if let Some(name) = &cli.body {
        let secondary = config::find_body(bodies, name)
            .ok_or_else(|| anyhow::anyhow!("body '{}' not found in catalog", name))?;
        let primary = config::parent_of(bodies, secondary)
            .ok_or_else(|| anyhow::anyhow!("body '{}' has no parent in the catalog", name))?;
        return Ok(RocheLagrangian::new(
            primary.mass_kg,
            secondary.mass_kg,
            secondary.semimajor_km,
        )?);
    }

    match (cli.m1, cli.m2, cli.dist) {
        (Some(m1), Some(m2), Some(dist)) => Ok(RocheLagrangian::new(m1, m2, dist)?),
        _ => Err(anyhow::anyhow!(
            "pass --body <name> or all of --m1, --m2, --dist"
        )),
    }
}
