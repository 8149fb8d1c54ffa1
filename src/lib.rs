#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod errors;
pub mod geometry;
pub mod ingest;
pub mod markers;
pub mod members;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod scene;
pub mod topology;

pub use config::{
    AxesStyle, BeamStyle, Color, CubeStyle, DirectionalLight, Environment, MarkerStyle, Material,
    NodeValidation, PipelineConfig, SceneStyle, Shading, TableSchema,
};
pub use errors::{MalformedNodeError, MissingTable, MissingTableError, SceneError, TableKind};
pub use geometry::{vec3, Axis, Orientation, Vec3, MIN_MEMBER_LENGTH};
pub use ingest::{
    row, Cell, MemberRecord, NodeRow, RawRow, SupportRecord, SupportType, Tables, Workbook,
};
pub use markers::{build_joints, build_supports, JointMarker, SupportBuild, SupportMarker};
pub use members::{beam_between, build_beams, Beam, BeamBuild};
pub use pipeline::{build_scene, build_scene_from_tables, BuildReport, SceneBuild};
pub use registry::{NodeRecord, NodeRegistry};
pub use render::{PresentError, RenderHost, RepaintTask, Viewport, ViewportSize};
pub use scene::{
    assemble, AxisIndicator, Cuboid, Cylinder, ReferenceCube, RenderPrimitive, SceneDescription,
    Sphere,
};
pub use topology::TopologySummary;
