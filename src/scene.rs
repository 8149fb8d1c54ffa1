//! Backend-agnostic scene description and the assembler that composes it.

use std::f64::consts::FRAC_PI_2;

use serde::Serialize;

use crate::config::{Environment, Material, SceneStyle};
use crate::geometry::{Axis, Orientation, Vec3};
use crate::markers::{JointMarker, SupportMarker};
use crate::members::Beam;

/// A cylinder whose long axis is its local Y axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Cylinder {
    /// Centre of the cylinder.
    pub position: Vec3,
    /// Rotation applied about the centre.
    pub orientation: Orientation,
    /// Radius of both caps.
    pub radius: f64,
    /// Distance between the caps.
    pub length: f64,
    /// Facets around the circumference.
    pub radial_segments: u32,
    /// Surface material.
    pub material: Material,
}

/// A sphere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sphere {
    /// Centre of the sphere.
    pub center: Vec3,
    /// Radius.
    pub radius: f64,
    /// Tessellation in both latitude and longitude.
    pub segments: u32,
    /// Surface material.
    pub material: Material,
}

/// An axis-aligned cube.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Cuboid {
    /// Centre of the cube.
    pub center: Vec3,
    /// Edge length.
    pub size: f64,
    /// Surface material.
    pub material: Material,
}

/// Colored cylinder running from the origin along a world axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisIndicator {
    /// The axis shown.
    pub axis: Axis,
    /// The indicator body.
    pub body: Cylinder,
}

/// Cube placed on a world axis as a scale reference.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReferenceCube {
    /// The axis the cube sits on.
    pub axis: Axis,
    /// The cube body.
    pub body: Cuboid,
}

/// A single drawable item.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderPrimitive {
    /// Origin axis indicator.
    Axis(AxisIndicator),
    /// Frame member.
    Beam(Beam),
    /// Fixed support.
    SupportMarker(SupportMarker),
    /// Node joint.
    JointMarker(JointMarker),
    /// Reference cube.
    ReferenceCube(ReferenceCube),
}

impl RenderPrimitive {
    /// Material the primitive is drawn with.
    #[must_use]
    pub fn material(&self) -> &Material {
        match self {
            RenderPrimitive::Axis(axis) => &axis.body.material,
            RenderPrimitive::Beam(beam) => &beam.body.material,
            RenderPrimitive::SupportMarker(marker) => &marker.body.material,
            RenderPrimitive::JointMarker(marker) => &marker.body.material,
            RenderPrimitive::ReferenceCube(cube) => &cube.body.material,
        }
    }
}

/// Everything a render host needs to draw one frame model.
///
/// Primitives are in draw order: axis indicators, reference cubes, beams,
/// supports, then joints.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneDescription {
    /// Background and lights.
    pub environment: Environment,
    /// Drawables in draw order.
    pub primitives: Vec<RenderPrimitive>,
}

impl SceneDescription {
    /// Number of primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// True when the scene has no primitives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Iterate the beams only.
    pub fn beams(&self) -> impl Iterator<Item = &Beam> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            RenderPrimitive::Beam(beam) => Some(beam),
            _ => None,
        })
    }

    /// Iterate the support markers only.
    pub fn supports(&self) -> impl Iterator<Item = &SupportMarker> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            RenderPrimitive::SupportMarker(marker) => Some(marker),
            _ => None,
        })
    }

    /// Iterate the joint markers only.
    pub fn joints(&self) -> impl Iterator<Item = &JointMarker> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            RenderPrimitive::JointMarker(marker) => Some(marker),
            _ => None,
        })
    }

    /// Serialize the scene to JSON for hosts outside the process.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the scene cannot be encoded.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Compose the fixed decorations and the frame primitives into one scene.
///
/// # Examples
/// ```
/// use framescene::{assemble, SceneStyle};
///
/// let scene = assemble(Vec::new(), Vec::new(), Vec::new(), &SceneStyle::default());
/// // Three axis indicators and three reference cubes.
/// assert_eq!(scene.len(), 6);
/// ```
#[must_use]
pub fn assemble(
    beams: Vec<Beam>,
    supports: Vec<SupportMarker>,
    joints: Vec<JointMarker>,
    style: &SceneStyle,
) -> SceneDescription {
    let mut primitives =
        Vec::with_capacity(Axis::ALL.len() * 2 + beams.len() + supports.len() + joints.len());
    primitives.extend(axis_indicators(style).map(RenderPrimitive::Axis));
    primitives.extend(reference_cubes(style).map(RenderPrimitive::ReferenceCube));
    primitives.extend(beams.into_iter().map(RenderPrimitive::Beam));
    primitives.extend(supports.into_iter().map(RenderPrimitive::SupportMarker));
    primitives.extend(joints.into_iter().map(RenderPrimitive::JointMarker));
    SceneDescription {
        environment: style.environment,
        primitives,
    }
}

/// Three cylinders each spanning from the origin along one world axis.
fn axis_indicators(style: &SceneStyle) -> [AxisIndicator; 3] {
    let axes = &style.axes;
    Axis::ALL.map(|axis| {
        let orientation = match axis {
            Axis::X => Orientation::about_axis(Axis::Z, -FRAC_PI_2),
            Axis::Y => Orientation::IDENTITY,
            Axis::Z => Orientation::about_axis(Axis::X, FRAC_PI_2),
        };
        let unit = axis.unit_vector().to_vector();
        AxisIndicator {
            axis,
            body: Cylinder {
                position: Vec3::from(unit * (axes.length / 2.0)),
                orientation,
                radius: axes.radius,
                length: axes.length,
                radial_segments: axes.radial_segments,
                material: Material::flat(axes.colors[axis as usize]),
            },
        }
    })
}

/// Three cubes placed at a fixed offset along each world axis.
fn reference_cubes(style: &SceneStyle) -> [ReferenceCube; 3] {
    let cubes = &style.cubes;
    Axis::ALL.map(|axis| ReferenceCube {
        axis,
        body: Cuboid {
            center: Vec3::from(axis.unit_vector().to_vector() * cubes.offset),
            size: cubes.size,
            material: cubes.material,
        },
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::Color;
    use crate::geometry::vec3;

    fn kinds(scene: &SceneDescription) -> Vec<&'static str> {
        scene
            .primitives
            .iter()
            .map(|primitive| match primitive {
                RenderPrimitive::Axis(_) => "axis",
                RenderPrimitive::Beam(_) => "beam",
                RenderPrimitive::SupportMarker(_) => "support",
                RenderPrimitive::JointMarker(_) => "joint",
                RenderPrimitive::ReferenceCube(_) => "cube",
            })
            .collect()
    }

    #[test]
    fn axes_span_from_origin_along_their_axis() {
        let style = SceneStyle::default();
        for indicator in axis_indicators(&style) {
            let unit = indicator.axis.unit_vector();
            let direction = indicator.body.orientation.long_axis();
            assert_relative_eq!(direction.to_vector(), unit.to_vector(), epsilon = 1.0e-12);
            let near_end = indicator.body.position.to_vector() - direction.to_vector() * 25.0;
            assert_relative_eq!(near_end, vec3(0.0, 0.0, 0.0).to_vector(), epsilon = 1.0e-12);
            assert_eq!(indicator.body.length, 50.0);
        }
        let colors: Vec<Color> = axis_indicators(&style)
            .iter()
            .map(|indicator| indicator.body.material.color)
            .collect();
        assert_eq!(colors, vec![Color::RED, Color::GREEN, Color::BLUE]);
    }

    #[test]
    fn reference_cubes_sit_on_each_axis() {
        let centers: Vec<Vec3> = reference_cubes(&SceneStyle::default())
            .iter()
            .map(|cube| cube.body.center)
            .collect();
        assert_eq!(
            centers,
            vec![
                vec3(10.0, 0.0, 0.0),
                vec3(0.0, 10.0, 0.0),
                vec3(0.0, 0.0, 10.0),
            ]
        );
    }

    #[test]
    fn translucent_markers_are_drawn_last() {
        let style = SceneStyle::default();
        let sphere = |radius| Sphere {
            center: vec3(1.0, 2.0, 3.0),
            radius,
            segments: 16,
            material: style.joint.material,
        };
        let beam = Beam {
            start_node: "A".to_owned(),
            end_node: "B".to_owned(),
            body: crate::members::beam_between(
                vec3(0.0, 0.0, 0.0),
                vec3(0.0, 0.0, 1.0),
                &style.beam,
            )
            .expect("non-degenerate"),
        };
        let scene = assemble(
            vec![beam],
            vec![SupportMarker {
                node: "A".to_owned(),
                support: crate::ingest::SupportType::Fixed,
                body: sphere(0.3),
            }],
            vec![JointMarker {
                node: "A".to_owned(),
                body: sphere(0.25),
            }],
            &style,
        );
        assert_eq!(
            kinds(&scene),
            vec!["axis", "axis", "axis", "cube", "cube", "cube", "beam", "support", "joint"]
        );
        let first_translucent = scene
            .primitives
            .iter()
            .position(|primitive| primitive.material().is_translucent())
            .expect("markers are translucent");
        assert!(scene.primitives[first_translucent..]
            .iter()
            .all(|primitive| primitive.material().is_translucent()));
        assert_eq!(scene.beams().count(), 1);
        assert_eq!(scene.supports().count(), 1);
        assert_eq!(scene.joints().count(), 1);
    }

    #[test]
    fn scene_serializes_with_kind_tags() {
        let scene = assemble(Vec::new(), Vec::new(), Vec::new(), &SceneStyle::default());
        let json: serde_json::Value =
            serde_json::from_str(&scene.to_json().expect("serializable")).expect("valid json");
        assert_eq!(json["primitives"][0]["kind"], "axis");
        assert_eq!(json["primitives"][0]["axis"], "x");
        assert_eq!(json["primitives"][3]["kind"], "reference_cube");
        assert_eq!(json["environment"]["background"], 0xff_ff_ff);
    }
}
