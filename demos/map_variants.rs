use beamx::{map_models, render_mapping_report, Beam};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Same bridge deck modelled twice: once in metres with the deck along X,
    // once in millimetres with the deck along Y
    let metres = vec![
        Beam::new(1, [0.0, 0.0, 0.0], [12.0, 0.0, 0.0], "PG1200", "Girders"),
        Beam::new(2, [12.0, 0.0, 0.0], [24.0, 0.0, 0.0], "PG1200", "Girders"),
        Beam::new(3, [0.0, 3.0, 0.0], [24.0, 3.0, 0.0], "PG1200", "Girders"),
    ];
    let millimetres = vec![
        Beam::new(7001, [0.0, 0.0, 0.0], [0.0, 24_000.0, 0.0], "PG1200", ""),
        Beam::new(7002, [-3_000.0, 0.0, 0.0], [-3_000.0, 24_000.0, 0.0], "PG1100", ""),
    ];

    // Three points picked on both models
    let rows = map_models(
        &[[0.0, 0.0, 0.0], [24.0, 0.0, 0.0], [0.0, 3.0, 0.0]],
        &[[0.0, 0.0, 0.0], [0.0, 24_000.0, 0.0], [-3_000.0, 0.0, 0.0]],
        &metres,
        &millimetres,
        0.5,
    )?;
    print!("{}", render_mapping_report(&rows));
    Ok(())
}
