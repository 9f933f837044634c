use beamx::Beam;

/// Correspondence points in the design model, in metres.
pub const DESIGN_POINTS: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [6.0, 0.0, 0.0], [0.0, 0.0, 4.0]];

/// The same points in the analysis model, in millimetres.
pub const ANALYSIS_POINTS: [[f64; 3]; 3] = [
    [5_000.0, 2_000.0, 0.0],
    [5_000.0, 8_000.0, 0.0],
    [5_000.0, 2_000.0, 4_000.0],
];

/// Portal frame as drawn by the designer: metres, frame in the XZ plane, left
/// column and girder split into two elements, one brace.
pub fn design_model() -> Vec<Beam> {
    vec![
        Beam::new(1, [0.0, 0.0, 0.0], [0.0, 0.0, 2.0], "HEA200", "Columns"),
        Beam::new(2, [0.0, 0.0, 2.0], [0.0, 0.0, 4.0], "HEA200", "Columns"),
        Beam::new(3, [0.0, 0.0, 4.0], [3.0, 0.0, 4.0], "IPE300", "Girders"),
        Beam::new(4, [3.0, 0.0, 4.0], [6.0, 0.0, 4.0], "IPE300", "Girders"),
        Beam::new(5, [6.0, 0.0, 4.0], [6.0, 0.0, 0.0], "HEA200", "Columns"),
        Beam::new(6, [0.0, 0.0, 0.0], [3.0, 0.0, 4.0], "CHS88", "Bracing"),
    ]
}

/// The same frame in the analysis model: millimetres, turned a quarter about Z
/// and moved to grid position (5000, 2000), without the brace.
pub fn analysis_model() -> Vec<Beam> {
    vec![
        Beam::new(1001, [5_000.0, 2_000.0, 0.0], [5_000.0, 2_000.0, 4_000.0], "HEA200", ""),
        Beam::new(1002, [5_000.0, 2_000.0, 4_000.0], [5_000.0, 8_000.0, 4_000.0], "IPE300", ""),
        Beam::new(1003, [5_000.0, 8_000.0, 4_000.0], [5_000.0, 8_000.0, 0.0], "HEA200", ""),
    ]
}
