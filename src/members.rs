//! Oriented cylinders for frame members.

use serde::Serialize;

use crate::config::BeamStyle;
use crate::geometry::{Orientation, Vec3};
use crate::ingest::MemberRecord;
use crate::registry::NodeRegistry;
use crate::scene::Cylinder;

/// A member rendered as a cylinder spanning its two nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Beam {
    /// Id of the start node.
    pub start_node: String,
    /// Id of the end node.
    pub end_node: String,
    /// Cylinder centred on the member midpoint with its long axis along the member.
    pub body: Cylinder,
}

/// Beams built from a member table, with the rows that were skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeamBuild {
    /// One beam per drawable member, in table order.
    pub beams: Vec<Beam>,
    /// Members naming a node id the registry does not know.
    pub unresolved: usize,
    /// Members whose endpoints coincide or are not finite.
    pub degenerate: usize,
}

/// Build a beam for every member whose endpoints resolve and are distinct.
///
/// # Examples
/// ```
/// use framescene::{build_beams, BeamStyle, MemberRecord, NodeRegistry, NodeRow, NodeValidation};
///
/// let nodes = [NodeRow::new("A", 0.0, 0.0, 0.0), NodeRow::new("B", 10.0, 0.0, 0.0)];
/// let registry = NodeRegistry::build(&nodes, NodeValidation::Reject).expect("valid nodes");
/// let members = [MemberRecord::new("A", "B"), MemberRecord::new("A", "missing")];
///
/// let built = build_beams(&members, &registry, &BeamStyle::default());
/// assert_eq!(built.beams.len(), 1);
/// assert_eq!(built.beams[0].body.length, 10.0);
/// assert_eq!(built.unresolved, 1);
/// ```
#[must_use]
pub fn build_beams(
    members: &[MemberRecord],
    registry: &NodeRegistry,
    style: &BeamStyle,
) -> BeamBuild {
    let mut built = BeamBuild::default();
    for member in members {
        let (Some(start), Some(end)) = (
            registry.get(&member.start_node),
            registry.get(&member.end_node),
        ) else {
            log::trace!(
                "member {:?} -> {:?} skipped: unknown node",
                member.start_node,
                member.end_node
            );
            built.unresolved += 1;
            continue;
        };
        match beam_between(start, end, style) {
            Some(body) => built.beams.push(Beam {
                start_node: member.start_node.clone(),
                end_node: member.end_node.clone(),
                body,
            }),
            None => {
                log::trace!(
                    "member {:?} -> {:?} skipped: zero length",
                    member.start_node,
                    member.end_node
                );
                built.degenerate += 1;
            }
        }
    }
    built
}

/// Cylinder spanning `start` to `end`, or `None` when the span has no direction.
#[must_use]
pub fn beam_between(start: Vec3, end: Vec3, style: &BeamStyle) -> Option<Cylinder> {
    let direction = Vec3::from(end.to_vector() - start.to_vector());
    let orientation = Orientation::along(direction)?;
    Some(Cylinder {
        position: start.midpoint(end),
        orientation,
        radius: style.radius,
        length: direction.length(),
        radial_segments: style.radial_segments,
        material: style.material,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::NodeValidation;
    use crate::geometry::vec3;
    use crate::ingest::NodeRow;

    fn registry(rows: &[NodeRow]) -> NodeRegistry {
        NodeRegistry::build(rows, NodeValidation::Reject).expect("valid nodes")
    }

    #[test]
    fn beam_along_x_has_expected_placement() {
        let body = beam_between(
            vec3(0.0, 0.0, 0.0),
            vec3(10.0, 0.0, 0.0),
            &BeamStyle::default(),
        )
        .expect("non-degenerate");
        assert_relative_eq!(body.length, 10.0);
        assert_eq!(body.position, vec3(5.0, 0.0, 0.0));
        assert_eq!(body.radius, 0.9);
        let axis = body.orientation.long_axis();
        assert_relative_eq!(axis.x, 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(axis.y, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(axis.z, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn unresolved_members_do_not_affect_neighbours() {
        let registry = registry(&[
            NodeRow::new("A", 0.0, 0.0, 0.0),
            NodeRow::new("B", 0.0, 3.0, 4.0),
        ]);
        let members = [
            MemberRecord::new("A", "Z"),
            MemberRecord::new("A", "B"),
            MemberRecord::new("", "B"),
        ];
        let built = build_beams(&members, &registry, &BeamStyle::default());
        assert_eq!(built.unresolved, 2);
        assert_eq!(built.beams.len(), 1);
        assert_eq!(built.beams[0].start_node, "A");
        assert_relative_eq!(built.beams[0].body.length, 5.0);
    }

    #[test]
    fn coincident_endpoints_are_skipped() {
        let registry = registry(&[
            NodeRow::new("A", 1.0, 1.0, 1.0),
            NodeRow::new("B", 1.0, 1.0, 1.0),
        ]);
        let members = [MemberRecord::new("A", "B"), MemberRecord::new("A", "A")];
        let built = build_beams(&members, &registry, &BeamStyle::default());
        assert!(built.beams.is_empty());
        assert_eq!(built.degenerate, 2);
        assert_eq!(built.unresolved, 0);
    }

    #[test]
    fn long_and_distant_members_stay_finite() {
        let long = beam_between(
            vec3(0.0, 0.0, 0.0),
            vec3(1.0e200, 0.0, 0.0),
            &BeamStyle::default(),
        )
        .expect("long member is drawn");
        assert_eq!(long.length, 1.0e200);
        assert_eq!(long.position, vec3(5.0e199, 0.0, 0.0));

        let distant = beam_between(
            vec3(1.7e308, 0.0, 0.0),
            vec3(1.7e308, 1.0, 0.0),
            &BeamStyle::default(),
        )
        .expect("distant member is drawn");
        assert_eq!(distant.position, vec3(1.7e308, 0.5, 0.0));
        assert_eq!(distant.length, 1.0);
    }

    #[test]
    fn nan_endpoints_are_skipped() {
        let mut registry = registry(&[NodeRow::new("A", 0.0, 0.0, 0.0)]);
        registry.insert("B".to_owned(), Vec3::nan());
        let built = build_beams(
            &[MemberRecord::new("A", "B")],
            &registry,
            &BeamStyle::default(),
        );
        assert!(built.beams.is_empty());
        assert_eq!(built.degenerate, 1);
    }

    #[test]
    fn every_beam_points_from_start_to_end() {
        let registry = registry(&[
            NodeRow::new("A", 1.0, -2.0, 0.5),
            NodeRow::new("B", -3.0, 4.0, 2.0),
            NodeRow::new("C", 1.0, 9.0, 0.5),
        ]);
        let members = [
            MemberRecord::new("A", "B"),
            MemberRecord::new("B", "C"),
            MemberRecord::new("A", "C"),
        ];
        let built = build_beams(&members, &registry, &BeamStyle::default());
        assert_eq!(built.beams.len(), 3);
        for beam in &built.beams {
            let start = registry.get(&beam.start_node).expect("resolved");
            let end = registry.get(&beam.end_node).expect("resolved");
            let expected = (end.to_vector() - start.to_vector()).normalize();
            let axis = beam.body.orientation.long_axis().to_vector();
            assert_relative_eq!(axis, expected, epsilon = 1.0e-12);
            assert_eq!(beam.body.position, start.midpoint(end));
        }
    }
}
