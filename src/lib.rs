#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod config;
mod errors;
mod geometry;
mod joiner;
mod mapper;
mod models;
mod report;
mod transform;

pub use crate::config::{MappingSettings, DEFAULT_MAP_TOLERANCE};
pub use crate::errors::{
    MappingError, ModelMappingError, ModelSide, SettingsError, TransformError,
};
pub use crate::geometry::{
    beams_from_json, point, Beam, BeamNumber, BeamRow, Node, NodeId, Point, PointLike,
    NODE_TOLERANCE,
};
pub use crate::joiner::{build_node_table, BeamJoiner, JoinOptions, DEFAULT_JOIN_TOLERANCE};
pub use crate::mapper::{
    project_onto_line, BeamMapper, LineMatch, LineProjection, LINE_EPSILON_SQUARED,
};
pub use crate::models::{map_models, MappedBeam};
pub use crate::report::{render_mapping_report, render_member_report};
pub use crate::transform::{GeometricTransformer, FRAME_EPSILON};
