use clap::Parser;
use roche_viz::config::{self, BodyConfig};
use roche_viz::export::{grid, mesh};
use roche_viz::field::{self, SamplingConfig, SamplingMode, SurfaceTransform};
use roche_viz::lagrangian::RocheLagrangian;
use std::path::PathBuf;

/// Export a Roche equipotential surface as a binary STL: the sampled height
/// field plus its mirrored lower sheet.
#[derive(Parser, Debug)]
#[command(author, version, about = "Roche surface STL exporter")]
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
    #[arg(long, default_value_t = 50)]
    points: usize,

    /// Outer sampling radius bound (nondimensional)
    #[arg(long, default_value_t = 1.725)]
    radius: f64,

    /// Inner radius bound and surface clamp value
    #[arg(long, default_value_t = 0.5)]
    limit: f64,

    /// Surface height scale
    #[arg(long, default_value_t = -1.5)]
    scale: f64,

    /// Surface height offset
    #[arg(long, default_value_t = -0.75)]
    offset: f64,

    /// Output STL file
    #[arg(long, default_value = "artifacts/roche.stl")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let bodies = load_catalog(cli.catalog.as_deref())?;
    let system = resolve_system(&cli, &bodies)?;

    let sampling = SamplingConfig {
        points: cli.points,
        radius: Some(cli.radius),
        radius_floor: cli.limit,
        mode: SamplingMode::Polar,
    };
    let transform = SurfaceTransform {
        scale: cli.scale,
        limit: cli.limit,
        offset: cli.offset,
    };

    let sampled = field::sample_field(&system, &sampling)?;
    let upper = sampled.with_surface(&transform);
    let lower = upper.mirrored_z();

    let mut triangles = field::triangulate(&upper);
    triangles.extend(field::triangulate(&lower));

    let stl: Vec<mesh::Triangle> = triangles
        .iter()
        .map(|t| mesh::Triangle {
            normal: t.normal,
            vertices: t.vertices,
        })
        .collect();

    let mut writer = grid::writer_for_path(&cli.output)?;
    mesh::write_binary_stl(&mut writer, "roche_surface", &stl)?;
    writer.flush()?;

    eprintln!(
        "wrote {} triangles to {}",
        stl.len(),
        cli.output.display()
    );
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
