use beamx::{render_member_report, Beam, BeamJoiner, JoinOptions};

fn main() {
    // A column line split at every floor, and a tie beam at level 2
    let beams = vec![
        Beam::new(1, [0.0, 0.0, 0.0], [0.0, 0.0, 3.5], "UC203", "Columns"),
        Beam::new(2, [0.0, 0.0, 3.5], [0.0, 0.0, 7.0], "UC203", "Columns"),
        Beam::new(3, [0.0, 0.0, 7.0], [0.0, 0.0, 10.5], "UC152", "Columns"),
        Beam::new(4, [0.0, 0.0, 7.0], [6.0, 0.0, 7.0], "UB305", "Beams"),
    ];

    // Only report the columns, but let the tie beam break the column line
    let options = JoinOptions {
        target_groups: ["Columns".to_string()].into_iter().collect(),
        ..JoinOptions::default()
    };
    let joiner = BeamJoiner::with_options(beams, options);

    print!("{}", render_member_report(&joiner.group_collinear_beams()));
}
