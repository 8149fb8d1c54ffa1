//! The end-to-end build from workbook to scene.

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::errors::SceneError;
use crate::ingest::{Tables, Workbook};
use crate::markers::{build_joints, build_supports};
use crate::members::build_beams;
use crate::registry::NodeRegistry;
use crate::scene::{assemble, SceneDescription};
use crate::topology::TopologySummary;

/// Counts describing what a build drew and what it skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Distinct nodes in the registry.
    pub nodes: usize,
    /// Node rows left out because they could not be read.
    pub excluded_nodes: usize,
    /// Beams drawn.
    pub beams: usize,
    /// Members naming an unknown node.
    pub unresolved_members: usize,
    /// Members with coincident or non-finite endpoints.
    pub degenerate_members: usize,
    /// Support markers drawn.
    pub supports: usize,
    /// Fixed supports naming an unknown node.
    pub unresolved_supports: usize,
    /// Supports of a type that is not drawn.
    pub not_fixed_supports: usize,
    /// Joint markers drawn.
    pub joints: usize,
    /// Connectivity of the drawn members.
    pub topology: TopologySummary,
}

impl BuildReport {
    /// Total member and support rows that produced nothing.
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.unresolved_members
            + self.degenerate_members
            + self.unresolved_supports
            + self.not_fixed_supports
    }
}

/// A finished scene together with its build report.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneBuild {
    /// The scene to hand to a render host.
    pub scene: SceneDescription,
    /// What was drawn and skipped.
    pub report: BuildReport,
}

/// Build a scene from a workbook.
///
/// The required sheets are checked before anything is decoded, and the node
/// registry is complete before any member or support is resolved. Row-level
/// problems are counted in the report and never abort the build.
///
/// # Errors
///
/// Returns [`SceneError::MissingTable`] when a required sheet is absent and
/// [`SceneError::MalformedNode`] when a node row is unreadable under
/// [`NodeValidation::Reject`](crate::NodeValidation::Reject).
///
/// # Examples
/// ```
/// use framescene::{build_scene, row, PipelineConfig, Workbook};
/// use serde_json::json;
///
/// let workbook = Workbook::new()
///     .with_sheet("A", vec![row([("Start Node", json!(1)), ("End Node", json!(2))])])
///     .with_sheet("B", vec![
///         row([("Node", json!(1)), ("X", json!(0)), ("Y", json!(0)), ("Z", json!(0))]),
///         row([("Node", json!(2)), ("X", json!(0)), ("Y", json!(12)), ("Z", json!(0))]),
///     ])
///     .with_sheet("C", vec![row([("NodeID", json!(1)), ("SupportType", json!("FIXED"))])]);
///
/// let built = build_scene(&workbook, &PipelineConfig::default()).expect("valid workbook");
/// assert_eq!(built.report.beams, 1);
/// assert_eq!(built.report.supports, 1);
/// assert_eq!(built.report.joints, 2);
/// ```
pub fn build_scene(workbook: &Workbook, config: &PipelineConfig) -> Result<SceneBuild, SceneError> {
    let tables = Tables::from_workbook(workbook, &config.schema)?;
    build_scene_from_tables(&tables, config)
}

/// Build a scene from already-validated tables.
///
/// # Errors
///
/// Returns [`SceneError::MalformedNode`] when a node row is unreadable under
/// [`NodeValidation::Reject`](crate::NodeValidation::Reject).
pub fn build_scene_from_tables(
    tables: &Tables,
    config: &PipelineConfig,
) -> Result<SceneBuild, SceneError> {
    let style = &config.style;
    let registry = NodeRegistry::build(&tables.nodes, config.node_validation)?;
    log::debug!(
        "registered {} node(s) from {} row(s)",
        registry.len(),
        tables.nodes.len()
    );

    let beams = build_beams(&tables.members, &registry, &style.beam);
    log::debug!(
        "built {} beam(s); skipped {} unresolved and {} degenerate member(s)",
        beams.beams.len(),
        beams.unresolved,
        beams.degenerate
    );

    let supports = build_supports(&tables.supports, &registry, &style.support);
    log::debug!(
        "built {} support marker(s); skipped {} unresolved and {} non-fixed support(s)",
        supports.markers.len(),
        supports.unresolved,
        supports.not_fixed
    );

    let joints = build_joints(&registry, &style.joint);
    let topology = TopologySummary::from_beams(&registry, &beams.beams);
    if !topology.is_connected() {
        log::warn!(
            "frame has {} disconnected part(s) and {} isolated node(s)",
            topology.components,
            topology.isolated_nodes
        );
    }

    let report = BuildReport {
        nodes: registry.len(),
        excluded_nodes: registry.excluded(),
        beams: beams.beams.len(),
        unresolved_members: beams.unresolved,
        degenerate_members: beams.degenerate,
        supports: supports.markers.len(),
        unresolved_supports: supports.unresolved,
        not_fixed_supports: supports.not_fixed,
        joints: joints.len(),
        topology,
    };
    let scene = assemble(beams.beams, supports.markers, joints, style);
    Ok(SceneBuild { scene, report })
}
