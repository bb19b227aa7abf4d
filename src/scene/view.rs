use tracing::warn;

use crate::config::SceneConfig;
use crate::error::{VizError, VizResult};
use crate::scene::{MountPoint, RenderBackend, SceneManager, StaticSummary};

/// What a globe mount ended up showing.
#[derive(Debug)]
pub enum GlobeView<B: RenderBackend, M: MountPoint> {
    Interactive(SceneManager<B, M>),
    /// Scene construction failed; `cause` says why.
    Fallback {
        summary: StaticSummary,
        cause: VizError,
    },
}

impl<B: RenderBackend, M: MountPoint> GlobeView<B, M> {
    /// Mounts the interactive globe, or the static summary when the scene
    /// cannot be built.
    ///
    /// Only an invalid configuration is reported as an error; every scene
    /// construction failure routes to the fallback.
    pub fn mount(backend: B, mount: M, config: SceneConfig) -> VizResult<Self> {
        config.validate()?;
        match SceneManager::init(backend, mount, config) {
            Ok(scene) => Ok(Self::Interactive(scene)),
            Err(err) => {
                warn!(error = %err.error, "globe unavailable, showing static summary");
                Ok(Self::Fallback {
                    summary: StaticSummary::default(),
                    cause: err.error,
                })
            }
        }
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive(_))
    }

    #[must_use]
    pub fn scene(&self) -> Option<&SceneManager<B, M>> {
        match self {
            Self::Interactive(scene) => Some(scene),
            Self::Fallback { .. } => None,
        }
    }

    pub fn scene_mut(&mut self) -> Option<&mut SceneManager<B, M>> {
        match self {
            Self::Interactive(scene) => Some(scene),
            Self::Fallback { .. } => None,
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<&StaticSummary> {
        match self {
            Self::Interactive(_) => None,
            Self::Fallback { summary, .. } => Some(summary),
        }
    }

    /// Renders one frame when interactive. The fallback never renders.
    pub fn tick(&mut self) -> VizResult<bool> {
        match self {
            Self::Interactive(scene) => scene.tick(),
            Self::Fallback { .. } => Ok(false),
        }
    }

    /// Tears down the scene, if any.
    pub fn unmount(&mut self) {
        if let Self::Interactive(scene) = self {
            scene.dispose();
        }
    }
}
