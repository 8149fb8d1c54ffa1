//! The boundary between scene construction and whatever draws it.
//!
//! A [`RenderHost`] owns the actual viewport resource. A [`Viewport`] owns the
//! host together with the scene on display and the repaint task registered for
//! it, so replacing or discarding the scene always tears the old task down
//! explicitly.

use std::error::Error;

use crate::errors::SceneError;
use crate::pipeline::SceneBuild;
use crate::scene::SceneDescription;

/// Pixel dimensions of a viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ViewportSize {
    /// Create a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, or `1.0` when the height is zero.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }
}

/// Something that can draw a [`SceneDescription`].
pub trait RenderHost {
    /// Error raised by the backend.
    type Error: Error + 'static;

    /// Discard whatever is on screen and load `scene` in its place.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the scene cannot be uploaded.
    fn replace(&mut self, scene: &SceneDescription) -> Result<(), Self::Error>;

    /// React to the viewport changing size.
    fn resize(&mut self, size: ViewportSize);

    /// Draw one frame of the current scene.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the frame cannot be drawn.
    fn repaint(&mut self) -> Result<(), Self::Error>;
}

/// Handle for the repaint loop of one displayed scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepaintTask {
    /// Increments every time a new scene is presented.
    generation: u64,
    /// Cleared by [`RepaintTask::cancel`].
    active: bool,
}

impl RepaintTask {
    /// A live task for presentation `generation`.
    fn start(generation: u64) -> Self {
        Self {
            generation,
            active: true,
        }
    }

    /// Stop the task; further frames are not drawn.
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// True until the task is cancelled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Which presentation this task belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Error returned by [`Viewport::present`].
#[derive(Debug, thiserror::Error)]
pub enum PresentError<E: Error + 'static> {
    /// The scene could not be built; the previous scene is still shown.
    #[error("scene build failed: {0}")]
    Build(#[source] SceneError),
    /// The host rejected the scene; the previous scene is still current.
    #[error("render host failed: {0}")]
    Host(#[source] E),
}

/// A render host together with the scene it displays.
#[derive(Debug)]
pub struct Viewport<H: RenderHost> {
    /// Backend that draws the scene.
    host: H,
    /// Last size forwarded to the host.
    size: ViewportSize,
    /// Scene on display.
    scene: Option<SceneDescription>,
    /// Repaint task of the displayed scene.
    repaint: Option<RepaintTask>,
    /// Number of scenes presented so far.
    generation: u64,
}

impl<H: RenderHost> Viewport<H> {
    /// Wrap a host with the given initial size.
    pub fn new(mut host: H, size: ViewportSize) -> Self {
        host.resize(size);
        Self {
            host,
            size,
            scene: None,
            repaint: None,
            generation: 0,
        }
    }

    /// Show the result of a scene build.
    ///
    /// On success the old repaint task is cancelled, the host receives the new
    /// scene and a fresh task is registered. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`PresentError::Build`] when `build` failed and
    /// [`PresentError::Host`] when the host rejected the scene.
    pub fn present(
        &mut self,
        build: Result<SceneBuild, SceneError>,
    ) -> Result<&SceneDescription, PresentError<H::Error>> {
        let build = build.map_err(|error| {
            log::error!("keeping previous scene: {error}");
            PresentError::Build(error)
        })?;
        self.host
            .replace(&build.scene)
            .map_err(PresentError::Host)?;
        if let Some(task) = self.repaint.as_mut() {
            task.cancel();
        }
        self.generation += 1;
        self.repaint = Some(RepaintTask::start(self.generation));
        log::debug!(
            "presenting scene {} with {} primitive(s)",
            self.generation,
            build.scene.len()
        );
        Ok(&*self.scene.insert(build.scene))
    }

    /// Forward a size change to the host.
    pub fn resize(&mut self, size: ViewportSize) {
        if size != self.size {
            self.size = size;
            self.host.resize(size);
        }
    }

    /// Draw one frame if a repaint task is active.
    ///
    /// Returns `Ok(false)` when nothing was drawn.
    ///
    /// # Errors
    ///
    /// Returns the host error if drawing fails.
    pub fn frame(&mut self) -> Result<bool, H::Error> {
        match self.repaint {
            Some(task) if task.is_active() => {
                self.host.repaint()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Cancel the repaint task and drop the displayed scene.
    pub fn discard(&mut self) {
        if let Some(task) = self.repaint.as_mut() {
            task.cancel();
        }
        self.scene = None;
    }

    /// The scene on display, if any.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneDescription> {
        self.scene.as_ref()
    }

    /// The current repaint task, if one was ever registered.
    #[must_use]
    pub fn repaint_task(&self) -> Option<RepaintTask> {
        self.repaint
    }

    /// Current size.
    #[must_use]
    pub fn size(&self) -> ViewportSize {
        self.size
    }

    /// Borrow the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Take the host back, cancelling any repaint task.
    pub fn into_host(mut self) -> H {
        self.discard();
        self.host
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::config::SceneStyle;
    use crate::errors::{MissingTable, MissingTableError, TableKind};
    use crate::pipeline::BuildReport;
    use crate::scene::assemble;

    #[derive(Debug, Default)]
    struct RecordingHost {
        replaced: Vec<usize>,
        sizes: Vec<ViewportSize>,
        frames: usize,
    }

    impl RenderHost for RecordingHost {
        type Error = Infallible;

        fn replace(&mut self, scene: &SceneDescription) -> Result<(), Infallible> {
            self.replaced.push(scene.len());
            Ok(())
        }

        fn resize(&mut self, size: ViewportSize) {
            self.sizes.push(size);
        }

        fn repaint(&mut self) -> Result<(), Infallible> {
            self.frames += 1;
            Ok(())
        }
    }

    fn empty_build() -> SceneBuild {
        SceneBuild {
            scene: assemble(Vec::new(), Vec::new(), Vec::new(), &SceneStyle::default()),
            report: BuildReport::default(),
        }
    }

    fn missing() -> SceneError {
        SceneError::MissingTable(MissingTableError {
            tables: vec![MissingTable {
                kind: TableKind::Nodes,
                sheet: "B".to_owned(),
            }],
        })
    }

    #[test]
    fn aspect_ratio_guards_zero_height() {
        assert_eq!(ViewportSize::new(800, 400).aspect_ratio(), 2.0);
        assert_eq!(ViewportSize::new(800, 0).aspect_ratio(), 1.0);
    }

    #[test]
    fn nothing_repaints_before_a_scene_is_presented() {
        let mut viewport = Viewport::new(RecordingHost::default(), ViewportSize::new(640, 480));
        assert_eq!(viewport.frame(), Ok(false));
        assert_eq!(viewport.host().sizes, vec![ViewportSize::new(640, 480)]);
    }

    #[test]
    fn presenting_replaces_scene_and_restarts_repaint() {
        let mut viewport = Viewport::new(RecordingHost::default(), ViewportSize::new(640, 480));
        viewport.present(Ok(empty_build())).expect("presented");
        let first = viewport.repaint_task().expect("task registered");
        assert_eq!(viewport.frame(), Ok(true));

        viewport.present(Ok(empty_build())).expect("presented");
        let second = viewport.repaint_task().expect("task registered");
        assert_ne!(first.generation(), second.generation());
        assert!(second.is_active());
        assert_eq!(viewport.host().replaced, vec![6, 6]);
    }

    #[test]
    fn failed_build_keeps_previous_scene() {
        let mut viewport = Viewport::new(RecordingHost::default(), ViewportSize::new(640, 480));
        viewport.present(Ok(empty_build())).expect("presented");
        let before = viewport.repaint_task();

        let error = viewport.present(Err(missing())).expect_err("build failed");
        assert!(matches!(error, PresentError::Build(SceneError::MissingTable(_))));
        assert_eq!(viewport.scene().map(SceneDescription::len), Some(6));
        assert_eq!(viewport.repaint_task(), before);
        assert_eq!(viewport.host().replaced.len(), 1);
    }

    #[test]
    fn discard_cancels_repaint() {
        let mut viewport = Viewport::new(RecordingHost::default(), ViewportSize::new(640, 480));
        viewport.present(Ok(empty_build())).expect("presented");
        viewport.discard();
        assert!(viewport.scene().is_none());
        assert_eq!(viewport.frame(), Ok(false));
        let host = viewport.into_host();
        assert_eq!(host.frames, 0);
    }

    #[test]
    fn resize_only_forwards_changes() {
        let mut viewport = Viewport::new(RecordingHost::default(), ViewportSize::new(640, 480));
        viewport.resize(ViewportSize::new(640, 480));
        viewport.resize(ViewportSize::new(1024, 768));
        assert_eq!(
            viewport.host().sizes,
            vec![ViewportSize::new(640, 480), ViewportSize::new(1024, 768)]
        );
        assert_eq!(viewport.size().aspect_ratio(), 1024.0 / 768.0);
    }
}
