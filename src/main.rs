use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;

use flapping_calc::io::{write_body_file, write_time_series_file};
use flapping_calc::{ellipse, regularize, CaseConfig, Flapping, NormalizedForceSeries, TimeSeries};

const USAGE: &str = "usage: flapping <body|coefficients> <case.toml>";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, case_path) = match args.as_slice() {
        [command, case] => (command.as_str(), PathBuf::from(case)),
        _ => bail!(USAGE),
    };
    let config = CaseConfig::load(&case_path)
        .with_context(|| format!("failed to load case file {}", case_path.display()))?;

    match command {
        "body" => create_body(&config),
        "coefficients" => compute_coefficients(&config),
        other => bail!("unknown command {other:?}; {USAGE}"),
    }
}

/// Create the ellipse cross-section, regularize it and write the body file.
fn create_body(config: &CaseConfig) -> Result<()> {
    let params = config.parameters();
    let a = params.chord() / 2.0;
    let b = params.thickness_ratio() * params.chord() / 2.0;

    let raw = ellipse(a, b, (0.0, 0.0), config.body.points_per_side)?;
    let body = regularize(raw.x(), raw.y(), config.body.spacing)?;
    info!(
        "ellipse a={a:.3} b={b:.3}: {} raw points -> {} points at ds={} (perimeter {:.4})",
        raw.len(),
        body.len(),
        config.body.spacing,
        body.perimeter()
    );

    let path = &config.case.body_file;
    write_body_file(path, &body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Normalize the solver forces, load the reference histories and write one
/// `CD`/`CL` pair of files per source.
fn compute_coefficients(config: &CaseConfig) -> Result<()> {
    let model = Flapping::new(config.parameters());
    for (name, value) in model.params().summary() {
        info!("  {name:<16} {value}");
    }

    let output_dir = &config.case.output_dir;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    for source in config.sources() {
        let coefficients = source
            .coefficients(&model, &config.case.data_dir)
            .with_context(|| format!("failed to compute coefficients for {}", source.label()))?;
        log_summary(source.label(), &coefficients);
        write_pair(output_dir, source.slug(), &coefficients)?;
    }
    Ok(())
}

fn write_pair(dir: &Path, slug: &str, coefficients: &NormalizedForceSeries) -> Result<()> {
    for (suffix, series) in [("CD", &coefficients.drag), ("CL", &coefficients.lift)] {
        let path = dir.join(format!("{slug}-{suffix}.txt"));
        write_time_series_file(&path, series)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn log_summary(label: &str, coefficients: &NormalizedForceSeries) {
    let describe = |series: &TimeSeries| match series.finite_range() {
        Some((lo, hi)) => format!("{} samples in [{lo:.3}, {hi:.3}]", series.len()),
        None => format!("{} samples, none finite", series.len()),
    };
    info!(
        "{label}: CD {} | CL {}",
        describe(&coefficients.drag),
        describe(&coefficients.lift)
    );
}
