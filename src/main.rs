mod demo;

use beamx::{
    map_models, render_mapping_report, render_member_report, BeamJoiner, MappingSettings,
};
use demo::{analysis_model, design_model, ANALYSIS_POINTS, DESIGN_POINTS};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Log to stderr so the reports on stdout stay clean. RUST_LOG=debug shows
    // the joining progress.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = MappingSettings::from_env()?;
    tracing::info!(
        join_tolerance = settings.join_tolerance,
        map_tolerance = settings.map_tolerance,
        target_groups = ?settings.target_groups,
        "loaded settings"
    );

    // Recover the physical members of the design model. The brace lands on the
    // middle of the girder, so the girder stays split there.
    let design = design_model();
    let joiner = BeamJoiner::with_options(design.clone(), settings.join_options());
    let members = joiner.group_collinear_beams();
    println!("Design model members");
    println!("{}", render_member_report(&members));

    // Carry the design model into the analysis model's frame and pair up the
    // beams of both models.
    let rows = map_models(
        &DESIGN_POINTS,
        &ANALYSIS_POINTS,
        &design,
        &analysis_model(),
        settings.map_tolerance,
    )?;
    println!("Design to analysis beam mapping");
    println!("{}", render_mapping_report(&rows));

    Ok(())
}
