//! File-to-coefficients pipeline over a scratch case directory.

use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use ndarray::{Array1, Zip};

use flapping_calc::io::{read_coefficient_file, write_body_file, write_time_series_file};
use flapping_calc::{
    ellipse, regularize, CalcError, CaseConfig, CoefficientSource, Flapping, ReferenceDataset,
    TimeSeries,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flapping-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_case_directory_round_trip() {
    let dir = scratch_dir("pipeline");
    let data_dir = dir.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    let case = r#"
        [case]
        references = ["Li et al. (2015)", "Nobody (1900)"]
    "#;
    fs::write(dir.join("case.toml"), case).unwrap();
    let config = CaseConfig::load(dir.join("case.toml")).unwrap();
    let model = Flapping::new(config.parameters());

    let raw = ellipse(0.5, 0.05, (0.0, 0.0), 100).unwrap();
    let body = regularize(raw.x(), raw.y(), config.body.spacing).unwrap();
    write_body_file(&config.case.body_file, &body).unwrap();

    // Synthetic solver output: drag opposing the stroke, lift always upward.
    let t = Array1::from_iter((0..200).map(|k| 0.01 + k as f64 * 0.04));
    let (u0, _) = model.translational_velocity(t.view());
    let rows: String = Zip::from(&t)
        .and(&u0)
        .map_collect(|&ti, &u| format!("{ti}\t{}\t{}\n", -0.5 * u, 0.25 + 0.1 * ti.sin()))
        .iter()
        .cloned()
        .collect();
    fs::write(&config.case.force_file, rows).unwrap();

    let li = TimeSeries::new(Array1::linspace(0.0, 4.0, 9), Array1::linspace(-1.0, 1.0, 9)).unwrap();
    write_time_series_file(data_dir.join("CD_current.dat"), &li).unwrap();
    write_time_series_file(data_dir.join("CL_current.dat"), &li).unwrap();

    let sources = config.sources();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[1], CoefficientSource::Reference(ReferenceDataset::LiEtAl2015));

    let simulation = sources[0].coefficients(&model, &config.case.data_dir).unwrap();
    assert_eq!(simulation.drag.len(), 200);
    assert_relative_eq!(simulation.drag.t()[1], 0.25 * 0.05, epsilon = 1e-12);
    // fx = -0.5 u flips to 0.5 |u|: every drag sample is positive.
    assert!(simulation.drag.values().iter().all(|&v| v > 0.0));
    assert!(simulation.lift.values().iter().all(|&v| v > 0.0));

    let reference = sources[1].coefficients(&model, &config.case.data_dir).unwrap();
    assert_eq!(reference.drag, li);

    let out = write_time_series_file(dir.join("petibm-CD.txt"), &simulation.drag).unwrap();
    let back = read_coefficient_file(out).unwrap();
    assert_eq!(back.len(), simulation.drag.len());
    assert_relative_eq!(back.values()[17], simulation.drag.values()[17], epsilon = 1e-12);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_force_file_is_an_error() {
    let dir = scratch_dir("missing-forces");
    let config = CaseConfig::load({
        let path = dir.join("case.toml");
        fs::write(&path, "").unwrap();
        path
    })
    .unwrap();
    let model = Flapping::new(config.parameters());

    let err = config.sources()[0]
        .coefficients(&model, &config.case.data_dir)
        .unwrap_err();
    assert!(matches!(err, CalcError::Io(_)));

    fs::remove_dir_all(&dir).unwrap();
}
