//! Configuration for table layout, node validation and scene styling.
//!
//! Defaults carry the constants of the original frame viewer. Most structs
//! deserialize with `#[serde(default)]`, so a partial JSON document only
//! overrides the fields it names.

use serde::{Deserialize, Serialize};

use crate::geometry::{vec3, Vec3};

/// An sRGB color packed as `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Pure red.
    pub const RED: Color = Color(0xff_00_00);
    /// Pure green.
    pub const GREEN: Color = Color(0x00_ff_00);
    /// Pure blue.
    pub const BLUE: Color = Color(0x00_00_ff);
    /// Black.
    pub const BLACK: Color = Color(0x00_00_00);
    /// White.
    pub const WHITE: Color = Color(0xff_ff_ff);

    /// Split into red, green and blue bytes.
    #[must_use]
    pub const fn rgb(self) -> [u8; 3] {
        [
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        ]
    }
}

/// How a surface responds to light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Shading {
    /// Unlit, constant color.
    Flat,
    /// Phong shading with a specular highlight.
    Phong {
        /// Specular exponent.
        shininess: f64,
        /// Color of the highlight.
        specular: Color,
    },
}

impl Shading {
    /// Phong shading with the usual defaults.
    pub const PHONG: Shading = Shading::Phong {
        shininess: 30.0,
        specular: Color(0x11_11_11),
    };
}

/// Surface appearance of a primitive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color.
    pub color: Color,
    /// Opacity in `0.0..=1.0`; anything below `1.0` is translucent.
    pub opacity: f64,
    /// Lighting model.
    pub shading: Shading,
}

impl Material {
    /// Opaque unlit material.
    #[must_use]
    pub const fn flat(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            shading: Shading::Flat,
        }
    }

    /// Opaque Phong material with default highlights.
    #[must_use]
    pub const fn phong(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            shading: Shading::PHONG,
        }
    }

    /// Return a copy with the given opacity.
    #[must_use]
    pub const fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }

    /// True when the material needs blending.
    #[must_use]
    pub fn is_translucent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// What to do with a node row whose id or coordinates cannot be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeValidation {
    /// Fail the whole build with a
    /// [`MalformedNodeError`](crate::MalformedNodeError).
    #[default]
    Reject,
    /// Leave the node out of the registry and carry on. An id whose latest
    /// row is unreadable is dropped even if an earlier row was valid.
    Exclude,
    /// Keep the node with NaN coordinates; geometry touching it is skipped.
    Propagate,
}

/// Sheet and column names used to read a workbook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSchema {
    /// Sheet holding member connectivity.
    pub members_sheet: String,
    /// Sheet holding node positions.
    pub nodes_sheet: String,
    /// Sheet holding support conditions.
    pub supports_sheet: String,
    /// Member column naming the start node.
    pub start_node_column: String,
    /// Member column naming the end node.
    pub end_node_column: String,
    /// Node column holding the node id.
    pub node_id_column: String,
    /// Node column holding the X coordinate.
    pub x_column: String,
    /// Node column holding the Y coordinate.
    pub y_column: String,
    /// Node column holding the Z coordinate.
    pub z_column: String,
    /// Support column naming the supported node.
    pub support_node_column: String,
    /// Support column holding the support type.
    pub support_type_column: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            members_sheet: "A".to_owned(),
            nodes_sheet: "B".to_owned(),
            supports_sheet: "C".to_owned(),
            start_node_column: "Start Node".to_owned(),
            end_node_column: "End Node".to_owned(),
            node_id_column: "Node".to_owned(),
            x_column: "X".to_owned(),
            y_column: "Y".to_owned(),
            z_column: "Z".to_owned(),
            support_node_column: "NodeID".to_owned(),
            support_type_column: "SupportType".to_owned(),
        }
    }
}

/// Appearance of member cylinders.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamStyle {
    /// Cylinder radius.
    pub radius: f64,
    /// Number of facets around the cylinder.
    pub radial_segments: u32,
    /// Surface material.
    pub material: Material,
}

impl Default for BeamStyle {
    fn default() -> Self {
        Self {
            radius: 0.9,
            radial_segments: 8,
            material: Material {
                color: Color(0x15_62_89),
                opacity: 1.0,
                shading: Shading::Phong {
                    shininess: 100.0,
                    specular: Color(0x11_11_11),
                },
            },
        }
    }
}

/// Appearance of spherical node markers.
///
/// Support and joint markers have different defaults, so an override must name
/// every field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Sphere radius.
    pub radius: f64,
    /// Tessellation in both latitude and longitude.
    pub segments: u32,
    /// Surface material.
    pub material: Material,
}

impl MarkerStyle {
    /// Default style for fixed-support markers.
    #[must_use]
    pub const fn support() -> Self {
        Self {
            radius: 0.3,
            segments: 16,
            material: Material::phong(Color(0x40_40_40)).with_opacity(0.8),
        }
    }

    /// Default style for joint markers.
    #[must_use]
    pub const fn joint() -> Self {
        Self {
            radius: 0.25,
            segments: 16,
            material: Material::phong(Color::BLACK).with_opacity(0.6),
        }
    }
}

/// Appearance of the origin axis indicators.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesStyle {
    /// Length of each indicator, measured from the origin.
    pub length: f64,
    /// Indicator radius.
    pub radius: f64,
    /// Number of facets around each indicator.
    pub radial_segments: u32,
    /// Colors for X, Y and Z.
    pub colors: [Color; 3],
}

impl Default for AxesStyle {
    fn default() -> Self {
        Self {
            length: 50.0,
            radius: 0.1,
            radial_segments: 8,
            colors: [Color::RED, Color::GREEN, Color::BLUE],
        }
    }
}

/// Appearance and placement of the reference cubes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeStyle {
    /// Edge length.
    pub size: f64,
    /// Distance of each cube from the origin along its axis.
    pub offset: f64,
    /// Surface material.
    pub material: Material,
}

impl Default for CubeStyle {
    fn default() -> Self {
        Self {
            size: 6.0,
            offset: 10.0,
            material: Material::phong(Color::GREEN),
        }
    }
}

/// A light shining from a fixed direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Light color.
    pub color: Color,
    /// Light intensity.
    pub intensity: f64,
    /// Position the light shines from, toward the origin.
    pub direction: Vec3,
}

/// Background and lighting handed to the render host with every scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Clear color behind the scene.
    pub background: Color,
    /// Ambient light color.
    pub ambient_color: Color,
    /// Ambient light intensity.
    pub ambient_intensity: f64,
    /// Single directional light.
    pub directional: DirectionalLight,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            ambient_color: Color::WHITE,
            ambient_intensity: 0.8,
            directional: DirectionalLight {
                color: Color::WHITE,
                intensity: 0.5,
                direction: vec3(1.0, 1.0, 1.0),
            },
        }
    }
}

/// Appearance of every primitive the assembler emits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    /// Member cylinders.
    pub beam: BeamStyle,
    /// Fixed-support markers.
    pub support: MarkerStyle,
    /// Joint markers.
    pub joint: MarkerStyle,
    /// Origin axis indicators.
    pub axes: AxesStyle,
    /// Reference cubes.
    pub cubes: CubeStyle,
    /// Background and lights.
    pub environment: Environment,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            beam: BeamStyle::default(),
            support: MarkerStyle::support(),
            joint: MarkerStyle::joint(),
            axes: AxesStyle::default(),
            cubes: CubeStyle::default(),
            environment: Environment::default(),
        }
    }
}

/// Everything [`build_scene`](crate::build_scene) needs besides the workbook.
///
/// # Examples
/// ```
/// use framescene::{NodeValidation, PipelineConfig};
///
/// let config: PipelineConfig =
///     serde_json::from_str(r#"{ "node_validation": "exclude", "style": { "beam": { "radius": 0.5 } } }"#)
///         .expect("valid config");
/// assert_eq!(config.node_validation, NodeValidation::Exclude);
/// assert_eq!(config.style.beam.radius, 0.5);
/// assert_eq!(config.style.beam.radial_segments, 8);
/// assert_eq!(config.schema.nodes_sheet, "B");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sheet and column names.
    pub schema: TableSchema,
    /// Primitive appearance.
    pub style: SceneStyle,
    /// Handling of unreadable node rows.
    pub node_validation: NodeValidation,
}

impl PipelineConfig {
    /// Return a copy using the given node validation policy.
    #[must_use]
    pub fn with_node_validation(mut self, node_validation: NodeValidation) -> Self {
        self.node_validation = node_validation;
        self
    }
}
