//! Readers and writers for the whitespace-delimited tables exchanged with the
//! flow solver and the plotting scripts.
//!
//! - force file: `t fx fy` rows
//! - body file: a point count on the first line, then `x y` rows
//! - coefficient file: `t/T value` rows
//!
//! Rows are parsed into a polars `DataFrame`; blank lines and lines starting
//! with `#` are skipped.

use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};

use log::info;
use ndarray::{Array1, ArrayView1};
use polars::prelude::*;

use crate::error::{ensure_len, CalcError, Result};
use crate::geometry::BodyPoints;
use crate::normalize::{ForceSeries, TimeSeries};

/// Parse whitespace-separated numeric rows into `columns` arrays.
///
/// `first_line` is the 1-based line number of `text` in its file, used in
/// error messages.
fn parse_columns(
    text: &str,
    path: &Path,
    first_line: usize,
    columns: usize,
) -> Result<Vec<Array1<f64>>> {
    let mut line_numbers = Vec::new();
    let mut csv = String::with_capacity(text.len());
    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != columns {
            return Err(CalcError::Parse {
                path: path.to_path_buf(),
                line: first_line + i,
                message: format!("expected {columns} columns, found {}", fields.len()),
            });
        }
        csv.push_str(&fields.join(","));
        csv.push('\n');
        line_numbers.push(first_line + i);
    }
    if line_numbers.is_empty() {
        return Ok(vec![Array1::zeros(0); columns]);
    }

    let df = CsvReader::new(Cursor::new(csv.into_bytes()))
        .has_header(false)
        .infer_schema(None)
        .finish()?;

    df.get_columns()
        .iter()
        .map(|column| {
            let column = column.cast(&DataType::Float64)?;
            column
                .f64()?
                .into_iter()
                .enumerate()
                .map(|(row, value)| {
                    value.ok_or_else(|| CalcError::Parse {
                        path: path.to_path_buf(),
                        line: line_numbers[row],
                        message: format!("non-numeric value in column {}", column.name()),
                    })
                })
                .collect::<Result<Array1<f64>>>()
        })
        .collect()
}

/// Parse the contents of a solver force file.
pub fn parse_force_table(text: &str, path: &Path) -> Result<ForceSeries> {
    let mut cols = parse_columns(text, path, 1, 3)?.into_iter();
    match (cols.next(), cols.next(), cols.next()) {
        (Some(t), Some(fx), Some(fy)) => ForceSeries::new(t, fx, fy),
        _ => Err(CalcError::Empty("force table")),
    }
}

/// Parse the contents of a body file.
pub fn parse_body_table(text: &str, path: &Path) -> Result<BodyPoints> {
    let (header, rows) = text.split_once('\n').unwrap_or((text, ""));
    let declared: usize = header.trim().parse().map_err(|_| CalcError::Parse {
        path: path.to_path_buf(),
        line: 1,
        message: format!("expected a point count, found {:?}", header.trim()),
    })?;
    let mut cols = parse_columns(rows, path, 2, 2)?.into_iter();
    let (x, y) = match (cols.next(), cols.next()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(CalcError::Empty("body table")),
    };
    if x.len() != declared {
        return Err(CalcError::BodyPointCount {
            declared,
            found: x.len(),
        });
    }
    BodyPoints::new(x, y)
}

/// Parse the contents of a two-column coefficient file.
pub fn parse_coefficient_table(text: &str, path: &Path) -> Result<TimeSeries> {
    let mut cols = parse_columns(text, path, 1, 2)?.into_iter();
    match (cols.next(), cols.next()) {
        (Some(t), Some(values)) => TimeSeries::new(t, values),
        _ => Err(CalcError::Empty("coefficient table")),
    }
}

/// Read a solver force file `(t, fx, fy)`.
pub fn read_force_file(path: impl AsRef<Path>) -> Result<ForceSeries> {
    let path = path.as_ref();
    let forces = parse_force_table(&fs::read_to_string(path)?, path)?;
    info!("read {} force samples from {}", forces.len(), path.display());
    Ok(forces)
}

/// Read a body file.
pub fn read_body_file(path: impl AsRef<Path>) -> Result<BodyPoints> {
    let path = path.as_ref();
    let body = parse_body_table(&fs::read_to_string(path)?, path)?;
    info!("read {} body points from {}", body.len(), path.display());
    Ok(body)
}

/// Read a two-column coefficient history.
pub fn read_coefficient_file(path: impl AsRef<Path>) -> Result<TimeSeries> {
    let path = path.as_ref();
    parse_coefficient_table(&fs::read_to_string(path)?, path)
}

fn write_columns<W: Write>(
    writer: &mut W,
    names: [&str; 2],
    a: ArrayView1<f64>,
    b: ArrayView1<f64>,
) -> Result<()> {
    ensure_len(a.len(), b.len())?;
    let mut df = DataFrame::new(vec![
        Series::new(names[0], a.to_vec()),
        Series::new(names[1], b.to_vec()),
    ])?;
    CsvWriter::new(writer)
        .has_header(false)
        .with_delimiter(b' ')
        .finish(&mut df)?;
    Ok(())
}

/// Write a body: the point count, then one `x y` row per point.
pub fn write_body<W: Write>(writer: &mut W, body: &BodyPoints) -> Result<()> {
    writeln!(writer, "{}", body.len())?;
    write_columns(writer, ["x", "y"], body.x(), body.y())
}

/// Write a `(t, value)` history as two whitespace-separated columns.
pub fn write_time_series<W: Write>(writer: &mut W, series: &TimeSeries) -> Result<()> {
    write_columns(writer, ["t", "value"], series.t(), series.values())
}

/// Write a body file, replacing any existing one.
pub fn write_body_file(path: impl AsRef<Path>, body: &BodyPoints) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_body(&mut writer, body)?;
    writer.flush()?;
    info!("wrote {} body points to {}", body.len(), path.display());
    Ok(())
}

/// Write a `(t, value)` history file and return its path.
pub fn write_time_series_file(path: impl AsRef<Path>, series: &TimeSeries) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_time_series(&mut writer, series)?;
    writer.flush()?;
    info!("wrote {} samples to {}", series.len(), path.display());
    Ok(path.to_path_buf())
}
