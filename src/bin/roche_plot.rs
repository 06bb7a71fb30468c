use clap::Parser;
use csv::ReaderBuilder;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use roche_viz::export::landmarks::Sidecar;
use std::fs::{self, File};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a Roche potential plot (grayscale fill + level contours) from grid CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    /// JSON landmark sidecar with contour levels and L-point positions
    #[arg(long)]
    landmarks: Option<PathBuf>,
    #[arg(long, default_value = "artifacts/roche.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 1000)]
    height: u32,
    /// Draw contour lines only, without the grayscale fill
    #[arg(long, default_value_t = false)]
    no_fill: bool,
    /// Skip L-point labels and mass markers
    #[arg(long, default_value_t = false)]
    no_text: bool,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    row: usize,
    col: usize,
    x_km: f64,
    y_km: f64,
    z: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (x, y, z) = read_grid(&cli.input)?;

    let sidecar: Option<Sidecar> = match &cli.landmarks {
        Some(path) => Some(serde_json::from_reader(File::open(path)?)?),
        None => None,
    };

    let mut z_min = f64::INFINITY;
    let mut z_max = f64::NEG_INFINITY;
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (row, z_row) in z.iter().enumerate() {
        for (col, &value) in z_row.iter().enumerate() {
            let (xc, yc) = (x[row][col], y[row][col]);
            if xc.is_finite() && yc.is_finite() {
                x_min = x_min.min(xc);
                x_max = x_max.max(xc);
                y_min = y_min.min(yc);
                y_max = y_max.max(yc);
            }
            if value.is_finite() {
                z_min = z_min.min(value);
                z_max = z_max.max(value);
            }
        }
    }
    if !(z_min.is_finite() && x_min.is_finite() && y_min.is_finite()) {
        return Err(anyhow::anyhow!("No finite samples in the provided CSV"));
    }

    // Equal-aspect ranges centered on the grid.
    let span = (x_max - x_min).max(y_max - y_min) * 1.02;
    let x_mid = 0.5 * (x_min + x_max);
    let y_mid = 0.5 * (y_min + y_max);
    let x_range = (x_mid - 0.5 * span)..(x_mid + 0.5 * span);
    let y_range = (y_mid - 0.5 * span)..(y_mid + 0.5 * span);

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(x_range, y_range)?;

    if !cli.no_fill {
        for row in 0..z.len().saturating_sub(1) {
            for col in 0..z[row].len().saturating_sub(1) {
                let corners = [
                    (row, col),
                    (row, col + 1),
                    (row + 1, col + 1),
                    (row + 1, col),
                ];
                let mut quad = Vec::with_capacity(4);
                let mut sum = 0.0;
                let mut finite = true;
                for &(r, c) in &corners {
                    let (xc, yc, zc) = (x[r][c], y[r][c], z[r][c]);
                    if !(xc.is_finite() && yc.is_finite() && zc.is_finite()) {
                        finite = false;
                        break;
                    }
                    quad.push((xc, yc));
                    sum += zc;
                }
                if !finite {
                    continue;
                }
                let t = if (z_max - z_min).abs() < f64::EPSILON {
                    0.0
                } else {
                    ((sum / 4.0 - z_min) / (z_max - z_min)).clamp(0.0, 1.0)
                };
                let lum = (t * 255.0) as u8;
                let gray = RGBColor(lum, lum, lum);
                chart.draw_series(std::iter::once(Polygon::new(quad, gray.filled())))?;
            }
        }
    }

    if let Some(sidecar) = &sidecar {
        let levels: Vec<(f64, RGBColor)> = sidecar
            .levels
            .iter()
            .map(|l| (l.value, level_color(&l.color)))
            .collect();
        draw_contours(&mut chart, &x, &y, &z, &levels)?;

        if !cli.no_text {
            for point in &sidecar.points {
                chart.draw_series(std::iter::once(Text::new(
                    point.name.clone(),
                    (point.x_km, point.y_km),
                    label_font.clone().color(&BLACK),
                )))?;
            }
            chart.draw_series(std::iter::once(Circle::new(
                sidecar.m1_xy_km,
                3,
                BLUE.filled(),
            )))?;
            chart.draw_series(std::iter::once(Circle::new(
                sidecar.m2_xy_km,
                2,
                ShapeStyle::from(&BLACK).stroke_width(1),
            )))?;
            chart.draw_series(std::iter::once(Cross::new(
                (0.0, 0.0),
                4,
                ShapeStyle::from(&BLACK).stroke_width(1),
            )))?;
        }
    }

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn level_color(name: &str) -> RGBColor {
    match name {
        "white" => WHITE,
        "red" => RED,
        "blue" => BLUE,
        "green" => GREEN,
        "cyan" => CYAN,
        _ => BLACK,
    }
}

type GridRows = Vec<Vec<f64>>;

fn read_grid(path: &str) -> anyhow::Result<(GridRows, GridRows, GridRows)> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| -> anyhow::Result<usize> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let row_idx = column("row")?;
    let col_idx = column("col")?;
    let x_idx = column("x_km")?;
    let y_idx = column("y_km")?;
    let z_idx = column("z")?;

    let mut cells = Vec::new();
    let mut n_rows = 0usize;
    let mut n_cols = 0usize;
    for rec in rdr.records() {
        let r = rec?;
        let row: usize = r.get(row_idx).unwrap_or("").parse()?;
        let col: usize = r.get(col_idx).unwrap_or("").parse()?;
        let x_km: f64 = r.get(x_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        let y_km: f64 = r.get(y_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        let z: f64 = r.get(z_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        n_rows = n_rows.max(row + 1);
        n_cols = n_cols.max(col + 1);
        cells.push(Cell {
            row,
            col,
            x_km,
            y_km,
            z,
        });
    }
    if cells.is_empty() {
        return Err(anyhow::anyhow!("No samples in the provided CSV"));
    }

    let mut x = vec![vec![f64::NAN; n_cols]; n_rows];
    let mut y = vec![vec![f64::NAN; n_cols]; n_rows];
    let mut z = vec![vec![f64::NAN; n_cols]; n_rows];
    for cell in cells {
        x[cell.row][cell.col] = cell.x_km;
        y[cell.row][cell.col] = cell.y_km;
        z[cell.row][cell.col] = cell.z;
    }
    Ok((x, y, z))
}

fn draw_contours<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    x: &[Vec<f64>],
    y: &[Vec<f64>],
    z: &[Vec<f64>],
    levels: &[(f64, RGBColor)],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if z.len() < 2 {
        return Ok(());
    }
    for &(level, color) in levels {
        for row in 0..z.len() - 1 {
            for col in 0..z[row].len().saturating_sub(1) {
                let corners = [
                    (row, col),
                    (row, col + 1),
                    (row + 1, col + 1),
                    (row + 1, col),
                ];
                let mut values = [0.0; 4];
                let mut coords = [(0.0, 0.0); 4];
                let mut finite = true;
                for (i, &(r, c)) in corners.iter().enumerate() {
                    let (xc, yc, zc) = (x[r][c], y[r][c], z[r][c]);
                    if !(xc.is_finite() && yc.is_finite() && zc.is_finite()) {
                        finite = false;
                        break;
                    }
                    values[i] = zc;
                    coords[i] = (xc, yc);
                }
                if !finite {
                    continue;
                }
                for (p1, p2) in marching_square_segments(values, coords, level) {
                    chart.draw_series(std::iter::once(PathElement::new(
                        vec![p1, p2],
                        ShapeStyle::from(&color).stroke_width(1),
                    )))?;
                }
            }
        }
    }
    Ok(())
}

fn marching_square_segments(
    values: [f64; 4],
    coords: [(f64, f64); 4],
    level: f64,
) -> Vec<((f64, f64), (f64, f64))> {
    let mut idx = 0u8;
    if values[0] >= level {
        idx |= 1;
    }
    if values[1] >= level {
        idx |= 2;
    }
    if values[2] >= level {
        idx |= 4;
    }
    if values[3] >= level {
        idx |= 8;
    }
    if idx == 0 || idx == 15 {
        return Vec::new();
    }

    let edge_point = |a: usize, b: usize| -> (f64, f64) {
        let va = values[a];
        let vb = values[b];
        let (xa, ya) = coords[a];
        let (xb, yb) = coords[b];
        if (vb - va).abs() < f64::EPSILON {
            return ((xa + xb) * 0.5, (ya + yb) * 0.5);
        }
        let t = (level - va) / (vb - va);
        (xa + t * (xb - xa), ya + t * (yb - ya))
    };

    let mut segments = Vec::new();
    let mut add = |e1: usize, e2: usize| {
        let p1 = match e1 {
            0 => edge_point(0, 1),
            1 => edge_point(1, 2),
            2 => edge_point(2, 3),
            3 => edge_point(3, 0),
            _ => unreachable!(),
        };
        let p2 = match e2 {
            0 => edge_point(0, 1),
            1 => edge_point(1, 2),
            2 => edge_point(2, 3),
            3 => edge_point(3, 0),
            _ => unreachable!(),
        };
        segments.push((p1, p2));
    };

    match idx {
        1 => add(3, 0),
        2 => add(0, 1),
        3 => add(3, 1),
        4 => add(1, 2),
        5 => {
            add(3, 2);
            add(0, 1);
        }
        6 => add(0, 2),
        7 => add(3, 2),
        8 => add(2, 3),
        9 => add(2, 0),
        10 => {
            add(3, 0);
            add(1, 2);
        }
        11 => add(1, 3),
        12 => add(1, 3),
        13 => add(1, 0),
        14 => add(0, 3),
        _ => {}
    }

    segments
}
