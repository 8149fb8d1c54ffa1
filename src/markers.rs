//! Sphere markers for supports and joints.

use serde::Serialize;

use crate::config::MarkerStyle;
use crate::geometry::Vec3;
use crate::ingest::{SupportRecord, SupportType};
use crate::registry::NodeRegistry;
use crate::scene::Sphere;

/// Marker drawn at a supported node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SupportMarker {
    /// Id of the supported node.
    pub node: String,
    /// Support classification.
    pub support: SupportType,
    /// Sphere at the node position.
    pub body: Sphere,
}

/// Marker drawn at every node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JointMarker {
    /// Id of the node.
    pub node: String,
    /// Sphere at the node position.
    pub body: Sphere,
}

/// Support markers built from a support table, with the rows that were skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SupportBuild {
    /// One marker per fixed support on a known node, in table order.
    pub markers: Vec<SupportMarker>,
    /// Supports naming an unknown node, or a node without a finite position.
    pub unresolved: usize,
    /// Supports whose type is not [`SupportType::Fixed`].
    pub not_fixed: usize,
}

/// Build a marker for every fixed support on a known node.
///
/// # Examples
/// ```
/// use framescene::{
///     build_supports, MarkerStyle, NodeRegistry, NodeRow, NodeValidation, SupportRecord, SupportType,
/// };
///
/// let registry = NodeRegistry::build(&[NodeRow::new("A", 0.0, 0.0, 0.0)], NodeValidation::Reject)
///     .expect("valid nodes");
/// let supports = [
///     SupportRecord::new("A", SupportType::Fixed),
///     SupportRecord::new("A", SupportType::Pinned),
/// ];
/// let built = build_supports(&supports, &registry, &MarkerStyle::support());
/// assert_eq!(built.markers.len(), 1);
/// assert_eq!(built.not_fixed, 1);
/// ```
#[must_use]
pub fn build_supports(
    supports: &[SupportRecord],
    registry: &NodeRegistry,
    style: &MarkerStyle,
) -> SupportBuild {
    let mut built = SupportBuild::default();
    for support in supports {
        if support.support_type != SupportType::Fixed {
            built.not_fixed += 1;
            continue;
        }
        match registry
            .get(&support.node_id)
            .filter(|position| position.is_finite())
        {
            Some(position) => built.markers.push(SupportMarker {
                node: support.node_id.clone(),
                support: support.support_type.clone(),
                body: sphere_at(position, style),
            }),
            None => {
                log::trace!("support on {:?} skipped: unknown node", support.node_id);
                built.unresolved += 1;
            }
        }
    }
    built
}

/// Build one joint marker per distinct node, in registry order.
///
/// Nodes without a finite position get no marker.
#[must_use]
pub fn build_joints(registry: &NodeRegistry, style: &MarkerStyle) -> Vec<JointMarker> {
    registry
        .iter()
        .filter(|node| node.position.is_finite())
        .map(|node| JointMarker {
            node: node.id.clone(),
            body: sphere_at(node.position, style),
        })
        .collect()
}

/// Marker sphere of `style` centred on `center`.
fn sphere_at(center: Vec3, style: &MarkerStyle) -> Sphere {
    Sphere {
        center,
        radius: style.radius,
        segments: style.segments,
        material: style.material,
    }
}
