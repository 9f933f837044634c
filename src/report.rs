//! Plain-text reports for model mapping and member joining.

use std::fmt::Write;

use crate::geometry::{Beam, Point};
use crate::models::MappedBeam;

/// Format a point with fixed precision for tabular output.
fn format_point(point: Point) -> String {
    format!("({:>9.3}, {:>9.3}, {:>9.3})", point.x, point.y, point.z)
}

/// Render the beam correspondence table produced by
/// [`map_models`](crate::map_models).
///
/// Each row lists the transformed beam, its match in the second model (or `-`)
/// and both profiles so mismatched sections stand out during checking.
#[must_use]
pub fn render_mapping_report(rows: &[MappedBeam]) -> String {
    let mut output = String::new();
    writeln!(
        &mut output,
        "{:>8}  {:<35}  {:<35}  {:>8}  {:<12}  {:<12}",
        "Beam", "Start", "End", "Match", "Profile", "Match profile"
    )
    .expect("writing to string cannot fail");

    for row in rows {
        let matched = row
            .matched
            .map_or_else(|| "-".to_string(), |number| number.to_string());
        writeln!(
            &mut output,
            "{:>8}  {:<35}  {:<35}  {:>8}  {:<12}  {:<12}",
            row.number,
            format_point(row.start),
            format_point(row.end),
            matched,
            row.profile,
            row.matched_profile.as_deref().unwrap_or("-"),
        )
        .expect("writing to string cannot fail");
    }

    let unmatched = rows.iter().filter(|row| row.matched.is_none()).count();
    writeln!(
        &mut output,
        "{} of {} beams matched",
        rows.len() - unmatched,
        rows.len()
    )
    .expect("writing to string cannot fail");
    output
}

/// Render the members found by [`BeamJoiner`](crate::BeamJoiner), one line each.
#[must_use]
pub fn render_member_report(members: &[Vec<Beam>]) -> String {
    let mut output = String::new();
    for (index, member) in members.iter().enumerate() {
        let numbers: Vec<String> = member.iter().map(|beam| beam.number().to_string()).collect();
        let length: f64 = member.iter().map(Beam::length).sum();
        let profile = member.first().map_or("-", Beam::profile);
        writeln!(
            &mut output,
            "Member {:>4}: {:<12} length = {:>10.3}  beams = [{}]",
            index + 1,
            profile,
            length,
            numbers.join(", ")
        )
        .expect("writing to string cannot fail");
    }
    output
}
