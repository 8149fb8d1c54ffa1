//! Text output for the command line tool.

use std::fmt::Write as _;
use std::io::{self, Write};

use framescene::{BuildReport, RenderHost, RenderPrimitive, SceneDescription, ViewportSize};

/// Render a textual summary of a scene build.
#[must_use]
pub fn render_report(report: &BuildReport) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Frame: {} node(s), {} beam(s), {} fixed support(s), {} joint(s)",
        report.nodes, report.beams, report.supports, report.joints
    )
    .expect("writing to string cannot fail");

    if report.skipped_rows() > 0 || report.excluded_nodes > 0 {
        writeln!(
            &mut output,
            "Skipped: {} unresolved member(s), {} zero-length member(s), {} unresolved support(s), {} non-fixed support(s), {} unreadable node row(s)",
            report.unresolved_members,
            report.degenerate_members,
            report.unresolved_supports,
            report.not_fixed_supports,
            report.excluded_nodes
        )
        .expect("writing to string cannot fail");
    }

    if report.topology.is_connected() {
        output.push_str("Topology: single connected structure\n");
    } else {
        writeln!(
            &mut output,
            "Topology: {} disconnected part(s), {} isolated node(s)",
            report.topology.components, report.topology.isolated_nodes
        )
        .expect("writing to string cannot fail");
    }

    output
}

/// A render host that writes the scene as JSON, one document per frame.
#[derive(Debug)]
pub struct TextHost<W: Write> {
    /// Destination of the scene documents.
    out: W,
    /// JSON of the current scene, written on every repaint.
    document: Option<String>,
}

impl<W: Write> TextHost<W> {
    /// Host writing to `out`, with no scene loaded yet.
    pub fn new(out: W) -> Self {
        Self {
            out,
            document: None,
        }
    }
}

impl<W: Write> RenderHost for TextHost<W> {
    type Error = io::Error;

    fn replace(&mut self, scene: &SceneDescription) -> io::Result<()> {
        let counts = scene
            .primitives
            .iter()
            .fold([0usize; 5], |mut counts, primitive| {
                let slot = match primitive {
                    RenderPrimitive::Axis(_) => 0,
                    RenderPrimitive::ReferenceCube(_) => 1,
                    RenderPrimitive::Beam(_) => 2,
                    RenderPrimitive::SupportMarker(_) => 3,
                    RenderPrimitive::JointMarker(_) => 4,
                };
                counts[slot] += 1;
                counts
            });
        log::info!(
            "scene loaded: {} axes, {} cubes, {} beams, {} supports, {} joints",
            counts[0],
            counts[1],
            counts[2],
            counts[3],
            counts[4]
        );
        self.document = Some(scene.to_json().map_err(io::Error::from)?);
        Ok(())
    }

    fn resize(&mut self, size: ViewportSize) {
        log::debug!(
            "viewport {}x{} (aspect {:.3})",
            size.width,
            size.height,
            size.aspect_ratio()
        );
    }

    fn repaint(&mut self) -> io::Result<()> {
        if let Some(document) = &self.document {
            writeln!(self.out, "{document}")?;
            self.out.flush()?;
        }
        Ok(())
    }
}
