//! Export helpers for CSV, JSON, and STL artifacts.

pub mod grid {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    const HEADER: &str = "row,col,x_km,y_km,z";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard grid CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the grid exporter. Non-finite `z` cells are
    /// written as `NaN` and skipped by readers.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub row: usize,
        pub col: usize,
        pub x_km: f64,
        pub y_km: f64,
        pub z: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{},{:.6},{:.6},{:.9}",
                self.row, self.col, self.x_km, self.y_km, self.z,
            )
        }
    }
}

pub mod landmarks {
    use serde::{Deserialize, Serialize};
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// One Lagrange point in the sidecar.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PointRecord {
        pub name: String,
        pub x_km: f64,
        pub y_km: f64,
        pub phi: f64,
    }

    /// One contour level in the sidecar.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct LevelRecord {
        pub label: String,
        pub value: f64,
        pub color: String,
    }

    /// JSON sidecar describing a resolved system alongside its grid CSV.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Sidecar {
        pub m1_kg: f64,
        pub m2_kg: f64,
        pub dist_km: f64,
        pub barycenter_km: f64,
        pub m1_xy_km: (f64, f64),
        pub m2_xy_km: (f64, f64),
        pub points: Vec<PointRecord>,
        pub levels: Vec<LevelRecord>,
    }

    /// Write the landmark sidecar next to the grid artifact.
    pub fn write_sidecar(output: &Path, sidecar: &Sidecar) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(output)?, sidecar)?;
        Ok(())
    }
}

pub mod mesh {
    use std::io::{self, Write};

    /// A triangle in the standard binary STL layout.
    #[derive(Debug, Clone, Copy)]
    pub struct Triangle {
        pub normal: [f32; 3],
        pub vertices: [[f32; 3]; 3],
    }

    /// Write a binary STL: 80-byte header, triangle count, then per-triangle
    /// normal, vertices, and a zero attribute word, all little-endian.
    pub fn write_binary_stl<W: Write>(
        writer: &mut W,
        name: &str,
        triangles: &[Triangle],
    ) -> io::Result<()> {
        let mut header = [0u8; 80];
        let label = name.as_bytes();
        let len = label.len().min(header.len());
        header[..len].copy_from_slice(&label[..len]);
        writer.write_all(&header)?;

        writer.write_all(&(triangles.len() as u32).to_le_bytes())?;
        for triangle in triangles {
            for component in triangle.normal {
                writer.write_all(&component.to_le_bytes())?;
            }
            for vertex in triangle.vertices {
                for component in vertex {
                    writer.write_all(&component.to_le_bytes())?;
                }
            }
            writer.write_all(&0u16.to_le_bytes())?;
        }
        Ok(())
    }
}
