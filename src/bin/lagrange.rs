use clap::Parser;
use roche_viz::config::{self, BodyConfig};
use roche_viz::lagrangian::RocheLagrangian;
use std::path::PathBuf;

/// Print Lagrange points and Roche potentials for two-body systems.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Lagrange point and Roche potential calculator"
)]
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

    /// Print every catalog body that orbits a parent
    #[arg(long, default_value_t = false)]
    all: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let bodies = load_catalog(cli.catalog.as_deref())?;

    if cli.all {
        for body in bodies.iter().filter(|b| b.parent.is_some()) {
            let (primary, system) = resolve_pair(&bodies, &body.name)?;
            print_system(&primary.name, &body.name, &system);
        }
        return Ok(());
    }

    if let Some(name) = &cli.body {
        let (primary, system) = resolve_pair(&bodies, name)?;
        let secondary = find_body(&bodies, name)?;
        print_system(&primary.name, &secondary.name, &system);
        return Ok(());
    }

    match (cli.m1, cli.m2, cli.dist) {
        (Some(m1), Some(m2), Some(dist)) => {
            let system = RocheLagrangian::new(m1, m2, dist)?;
            print_system("m1", "m2", &system);
            Ok(())
        }
        _ => Err(anyhow::anyhow!(
            "pass --body <name> or all of --m1, --m2, --dist"
        )),
    }
}

fn load_catalog(path: Option<&std::path::Path>) -> anyhow::Result<Vec<BodyConfig>> {
    match path {
        Some(path) => Ok(config::load_bodies(path)?),
        None => Ok(config::builtin_catalog()),
    }
}

fn find_body<'a>(bodies: &'a [BodyConfig], name: &str) -> anyhow::Result<&'a BodyConfig> {
    config::find_body(bodies, name)
        .ok_or_else(|| anyhow::anyhow!("body '{}' not found in catalog", name))
}

fn resolve_pair<'a>(
    bodies: &'a [BodyConfig],
    name: &str,
) -> anyhow::Result<(&'a BodyConfig, RocheLagrangian)> {
    let secondary = find_body(bodies, name)?;
    let primary = config::parent_of(bodies, secondary)
        .ok_or_else(|| anyhow::anyhow!("body '{}' has no parent in the catalog", name))?;
    let system = RocheLagrangian::new(primary.mass_kg, secondary.mass_kg, secondary.semimajor_km)?;
    Ok((primary, system))
}

fn print_system(primary: &str, secondary: &str, system: &RocheLagrangian) {
    println!("{}:", secondary);
    println!(
        "  {}: ({:.3}, {:.3}) km",
        primary, system.m1_xy_km.0, system.m1_xy_km.1
    );
    println!(
        "  {}: ({:.3}, {:.3}) km",
        secondary, system.m2_xy_km.0, system.m2_xy_km.1
    );
    for solution in system.points() {
        println!(
            "  {}: ({:.3}, {:.3}) km  phi={:.6}",
            solution.point.label(),
            solution.x_km,
            solution.y_km,
            solution.phi
        );
    }
}
