#![warn(clippy::pedantic)]

use approx::assert_abs_diff_eq;
use beamx::{
    map_models, point, render_mapping_report, Beam, BeamMapper, GeometricTransformer,
    TransformError,
};

fn truss_chord() -> Vec<Beam> {
    vec![
        Beam::new(1, [0.0, 0.0, 0.0], [2.5, 0.0, 0.0], "SHS100", "Chord"),
        Beam::new(2, [2.5, 0.0, 0.0], [5.0, 0.0, 0.0], "SHS100", "Chord"),
        Beam::new(3, [0.0, 0.0, 0.0], [2.5, 0.0, 1.5], "SHS60", "Web"),
        Beam::new(4, [2.5, 0.0, 1.5], [5.0, 0.0, 0.0], "SHS60", "Web"),
    ]
}

#[test]
fn identity_mapping_leaves_points_in_place() {
    let points = [[0.0, 0.0, 0.0], [100.0, 0.0, 0.0], [0.0, 200.0, 0.0]];
    let mut transformer = GeometricTransformer::new();
    transformer
        .set_mapping_points(&points, &points)
        .expect("well conditioned points");
    let mapped = transformer
        .transform_point([50.0, 50.0, 0.0])
        .expect("transform is set");
    assert_abs_diff_eq!(mapped.x, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped.y, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped.z, 0.0, epsilon = 1e-9);
}

#[test]
fn refitting_replaces_previous_transform() {
    let unit = [point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0), point(0.0, 1.0, 0.0)];
    let shifted = [point(0.0, 0.0, 7.0), point(1.0, 0.0, 7.0), point(0.0, 1.0, 7.0)];
    let mut transformer = GeometricTransformer::new();
    transformer.set_mapping_points(&unit, &shifted).expect("set");
    transformer.set_mapping_points(&unit, &unit).expect("set");
    let mapped = transformer.transform_point(point(0.5, 0.5, 0.0)).expect("set");
    assert_abs_diff_eq!(mapped.z, 0.0, epsilon = 1e-12);
}

#[test]
fn failed_fit_is_reported() {
    let mut transformer = GeometricTransformer::new();
    let too_many = [[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let error = transformer
        .set_mapping_points(&too_many, &too_many)
        .expect_err("four points are rejected");
    assert!(matches!(error, TransformError::WrongPointCount { count: 4, .. }));
}

#[test]
fn identical_models_map_beam_for_beam() {
    let first = truss_chord();
    let second = truss_chord();
    let mapping = BeamMapper::new(&first, &second)
        .map_lines(0.001, 0.001)
        .expect("no degenerate beams");
    for beam in &first {
        assert_eq!(mapping[&beam.number()], Some(beam.number()));
    }
}

#[test]
fn rotated_copy_is_recognised() {
    // The second model turns the first a quarter about Z, doubles it and
    // moves it to (20, 10, 0); its chord is one element and its web is missing.
    let second = vec![
        Beam::new(501, [20.0, 10.0, 0.0], [20.0, 20.0, 0.0], "SHS100", ""),
        Beam::new(502, [20.0, 10.0, 0.0], [20.0, 10.0, 9.0], "SHS100", ""),
    ];
    let rows = map_models(
        &[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [0.0, 0.0, 1.5]],
        &[[20.0, 10.0, 0.0], [20.0, 20.0, 0.0], [20.0, 10.0, 3.0]],
        &truss_chord(),
        &second,
        0.01,
    )
    .expect("well conditioned mapping");

    let matched: Vec<_> = rows.iter().map(|row| row.matched).collect();
    assert_eq!(matched, vec![Some(501), Some(501), None, None]);
    assert_abs_diff_eq!(rows[1].end.y, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rows[2].end.z, 3.0, epsilon = 1e-9);

    let report = render_mapping_report(&rows);
    assert!(report.contains("2 of 4 beams matched"));
}
