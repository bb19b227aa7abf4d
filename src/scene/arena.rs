use indexmap::IndexSet;
use tracing::warn;

use crate::error::VizResult;
use crate::scene::{RenderBackend, ResourceHandle};

/// Ledger of graphics resources a scene owns.
///
/// Every handle returned by a backend upload is registered here, so
/// teardown can release exactly what was allocated, in allocation order,
/// even when construction stopped halfway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceArena {
    owned: IndexSet<ResourceHandle>,
}

impl ResourceArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the result of an upload and passes the handle through.
    pub fn track(&mut self, upload: VizResult<ResourceHandle>) -> VizResult<ResourceHandle> {
        let handle = upload?;
        self.owned.insert(handle);
        Ok(handle)
    }

    #[must_use]
    pub fn contains(&self, handle: ResourceHandle) -> bool {
        self.owned.contains(&handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = ResourceHandle> + '_ {
        self.owned.iter().copied()
    }

    /// Releases one owned handle. Unknown handles are left alone.
    pub fn release(
        &mut self,
        backend: &mut dyn RenderBackend,
        handle: ResourceHandle,
    ) -> VizResult<bool> {
        if !self.owned.shift_remove(&handle) {
            return Ok(false);
        }
        backend.release(handle)?;
        Ok(true)
    }

    /// Releases every owned handle. Failures are logged and skipped so one
    /// bad handle cannot leak the rest.
    pub fn release_all(&mut self, backend: &mut dyn RenderBackend) -> usize {
        let mut released = 0;
        for handle in self.owned.drain(..) {
            match backend.release(handle) {
                Ok(()) => released += 1,
                Err(err) => warn!(?handle, error = %err, "failed to release graphics resource"),
            }
        }
        released
    }
}
