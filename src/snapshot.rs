//! Whole-grid snapshots assembled from owned row bands.
//!
//! Each band contributes exactly its owned rows, never ghost rows, so the
//! assembled field has no overlap and no gaps.

use crate::decomposition::RowBand;
use crate::domain::*;
use crate::error::*;
use crate::util::*;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

/// On disk layout of a snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SnapshotFormat {
    /// Two comment lines, then one line of `ny` values per row.
    #[default]
    Text,
    /// Raw little endian `f64`, row-major, no header.
    Binary,
}

impl SnapshotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SnapshotFormat::Text => "dat",
            SnapshotFormat::Binary => "bin",
        }
    }
}

/// Where and how often to write snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotConfig {
    pub output_dir: PathBuf,
    /// Steps between snapshots, step 0 is always written.
    pub interval: usize,
    pub format: SnapshotFormat,
}

impl SnapshotConfig {
    pub fn path(&self, step: usize) -> PathBuf {
        let mut result = self.output_dir.clone();
        result.push(format!(
            "heat_solution_{:05}.{}",
            step,
            self.format.extension()
        ));
        result
    }

    pub fn is_due(&self, step: usize) -> bool {
        self.interval > 0 && step % self.interval == 0
    }
}

/// The full `nx x ny` field, only ever built on rank 0.
#[derive(Debug, Clone)]
pub struct GlobalField {
    nx: usize,
    ny: usize,
    domain: OwnedDomain,
}

impl GlobalField {
    pub fn allocate(nx: usize, ny: usize, rank: usize) -> Result<Self> {
        let grid_box = GridBox::grid(nx, ny);
        let domain = OwnedDomain::try_new(grid_box).map_err(|_| {
            HeatError::Resource {
                rank,
                cells: grid_box.buffer_size(),
            }
        })?;
        Ok(GlobalField { nx, ny, domain })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Copy the owned rows of `band` into place.
    pub fn insert_band(&mut self, band: &RowBand, owned_values: &[f64]) {
        debug_assert_eq!(owned_values.len(), band.row_count * self.ny);
        self.domain
            .rows_mut(band.start_row as i32, band.row_count)
            .copy_from_slice(owned_values);
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.domain.view(&vector![row as i32, col as i32])
    }

    pub fn row(&self, row: usize) -> &[f64] {
        self.domain.row(row as i32)
    }

    /// Row-major values.
    pub fn values(&self) -> &[f64] {
        self.domain.buffer()
    }

    pub fn write<P: AsRef<Path>>(
        &self,
        path: &P,
        format: SnapshotFormat,
        step: usize,
        dt: f64,
    ) -> std::io::Result<()> {
        profiling::scope!("snapshot: write");
        tracing::info!(path = ?path.as_ref(), step, "writing snapshot");
        let mut output = std::io::BufWriter::new(std::fs::File::create(path)?);
        match format {
            SnapshotFormat::Text => self.write_text(&mut output, step, dt)?,
            SnapshotFormat::Binary => {
                output.write_all(bytemuck::cast_slice(self.values()))?
            }
        }
        output.flush()
    }

    fn write_text<W: Write>(
        &self,
        output: &mut W,
        step: usize,
        dt: f64,
    ) -> std::io::Result<()> {
        writeln!(output, "# Heat equation solution at timestep {step}")?;
        writeln!(
            output,
            "# nx={} ny={} time={:.6}",
            self.nx,
            self.ny,
            step as f64 * dt
        )?;
        for row in 0..self.nx {
            let mut values = self.row(row).iter();
            if let Some(first) = values.next() {
                write!(output, "{first:.6}")?;
            }
            for v in values {
                write!(output, " {v:.6}")?;
            }
            writeln!(output)?;
        }
        Ok(())
    }
}

/// Utility function to ensure output directories exist when needed
pub fn ensure_dir_exists<P: AsRef<Path>>(path: &P) -> std::io::Result<()> {
    let p = path.as_ref();
    if p.exists() {
        if !p.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{p:?} exists and is not a directory"),
            ));
        }
        tracing::debug!(path = ?p, "output directory exists");
        Ok(())
    } else {
        tracing::info!(path = ?p, "creating output directory");
        std::fs::create_dir_all(p)
    }
}
