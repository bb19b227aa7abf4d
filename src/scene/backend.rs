use glam::Vec3;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Viewport;
use crate::error::{VizError, VizResult};
use crate::scene::{SceneFrame, SphereGeometry};
use crate::texture::Raster;

/// Kind of graphics resource a backend allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Texture,
    Geometry,
    Points,
}

/// Opaque handle to a backend-owned graphics resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceHandle {
    kind: ResourceKind,
    id: u64,
}

impl ResourceHandle {
    #[must_use]
    pub const fn new(kind: ResourceKind, id: u64) -> Self {
        Self { kind, id }
    }

    #[must_use]
    pub const fn kind(self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.id
    }
}

/// Opaque handle to a backend render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Logical surface size plus the pixel ratio it is rendered at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub viewport: Viewport,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(viewport: Viewport, pixel_ratio: f64) -> Self {
        Self {
            viewport,
            pixel_ratio,
        }
    }

    /// Size of the backing store in physical pixels.
    #[must_use]
    pub fn physical(self) -> Viewport {
        let scale = |logical: u32| (f64::from(logical) * self.pixel_ratio).round().max(1.0) as u32;
        Viewport::new(scale(self.viewport.width), scale(self.viewport.height))
    }

    pub fn validate(self) -> VizResult<()> {
        if !self.viewport.is_valid() {
            return Err(VizError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(VizError::InvalidData(
                "pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Contract implemented by any 3D drawing backend.
///
/// The scene owns every handle the backend returns and releases each one
/// exactly once.
pub trait RenderBackend {
    fn backend_name(&self) -> &'static str;

    /// Whether a 3D context can be created at all.
    fn supports_3d(&self) -> bool;

    fn create_surface(&mut self, size: SurfaceSize) -> VizResult<SurfaceHandle>;

    fn resize_surface(&mut self, surface: SurfaceHandle, size: SurfaceSize) -> VizResult<()>;

    fn release_surface(&mut self, surface: SurfaceHandle) -> VizResult<()>;

    fn upload_texture(&mut self, raster: &Raster) -> VizResult<ResourceHandle>;

    fn upload_geometry(&mut self, geometry: &SphereGeometry) -> VizResult<ResourceHandle>;

    fn upload_points(&mut self, positions: &[Vec3]) -> VizResult<ResourceHandle>;

    fn release(&mut self, resource: ResourceHandle) -> VizResult<()>;

    fn draw(&mut self, surface: SurfaceHandle, frame: &SceneFrame) -> VizResult<()>;
}

/// Per-draw statistics recorded by `HeadlessBackend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadlessDrawStats {
    pub frame_index: u64,
    pub mesh_count: usize,
    pub points_count: usize,
    pub light_count: usize,
}

/// Backend without a GPU that validates and records everything it is asked
/// to do.
///
/// Used for tests, server-side snapshots and hosts that only need the scene
/// state machine.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    supports_3d: bool,
    upload_budget: Option<usize>,
    next_id: u64,
    surfaces: IndexMap<SurfaceHandle, SurfaceSize>,
    live: IndexSet<ResourceHandle>,
    released: Vec<ResourceHandle>,
    uploads: usize,
    frames_drawn: usize,
    last_draw: Option<HeadlessDrawStats>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            supports_3d: true,
            upload_budget: None,
            next_id: 1,
            surfaces: IndexMap::new(),
            live: IndexSet::new(),
            released: Vec::new(),
            uploads: 0,
            frames_drawn: 0,
            last_draw: None,
        }
    }

    /// Backend whose capability probe reports no 3D context.
    #[must_use]
    pub fn without_3d() -> Self {
        Self {
            supports_3d: false,
            ..Self::new()
        }
    }

    /// Fails every upload after the first `budget` ones.
    #[must_use]
    pub fn with_upload_budget(mut self, budget: usize) -> Self {
        self.upload_budget = Some(budget);
        self
    }

    #[must_use]
    pub fn live_resources(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_live(&self, resource: ResourceHandle) -> bool {
        self.live.contains(&resource)
    }

    /// Resources released so far, in release order.
    #[must_use]
    pub fn released(&self) -> &[ResourceHandle] {
        &self.released
    }

    #[must_use]
    pub fn live_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    #[must_use]
    pub fn surface_size(&self, surface: SurfaceHandle) -> Option<SurfaceSize> {
        self.surfaces.get(&surface).copied()
    }

    #[must_use]
    pub fn uploads(&self) -> usize {
        self.uploads
    }

    #[must_use]
    pub fn frames_drawn(&self) -> usize {
        self.frames_drawn
    }

    #[must_use]
    pub fn last_draw(&self) -> Option<HeadlessDrawStats> {
        self.last_draw
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn allocate(&mut self, kind: ResourceKind) -> VizResult<ResourceHandle> {
        if self.upload_budget.is_some_and(|budget| self.uploads >= budget) {
            return Err(VizError::Backend(format!(
                "headless upload budget exhausted while uploading {kind:?}"
            )));
        }
        self.uploads += 1;
        let handle = ResourceHandle::new(kind, self.allocate_id());
        self.live.insert(handle);
        trace!(?handle, "headless resource uploaded");
        Ok(handle)
    }
}

impl RenderBackend for HeadlessBackend {
    fn backend_name(&self) -> &'static str {
        "headless"
    }

    fn supports_3d(&self) -> bool {
        self.supports_3d
    }

    fn create_surface(&mut self, size: SurfaceSize) -> VizResult<SurfaceHandle> {
        if !self.supports_3d {
            return Err(VizError::RenderingUnavailable);
        }
        size.validate()?;
        let surface = SurfaceHandle::new(self.allocate_id());
        self.surfaces.insert(surface, size);
        Ok(surface)
    }

    fn resize_surface(&mut self, surface: SurfaceHandle, size: SurfaceSize) -> VizResult<()> {
        size.validate()?;
        let slot = self
            .surfaces
            .get_mut(&surface)
            .ok_or_else(|| VizError::Backend(format!("unknown surface {surface:?}")))?;
        *slot = size;
        Ok(())
    }

    fn release_surface(&mut self, surface: SurfaceHandle) -> VizResult<()> {
        self.surfaces
            .shift_remove(&surface)
            .map(|_| ())
            .ok_or_else(|| VizError::Backend(format!("surface {surface:?} released twice")))
    }

    fn upload_texture(&mut self, raster: &Raster) -> VizResult<ResourceHandle> {
        if raster.width() == 0 || raster.height() == 0 {
            return Err(VizError::InvalidViewport {
                width: raster.width(),
                height: raster.height(),
            });
        }
        self.allocate(ResourceKind::Texture)
    }

    fn upload_geometry(&mut self, geometry: &SphereGeometry) -> VizResult<ResourceHandle> {
        if geometry.indices().is_empty() {
            return Err(VizError::InvalidData(
                "geometry has no triangles".to_owned(),
            ));
        }
        self.allocate(ResourceKind::Geometry)
    }

    fn upload_points(&mut self, positions: &[Vec3]) -> VizResult<ResourceHandle> {
        if positions.iter().any(|position| !position.is_finite()) {
            return Err(VizError::InvalidData(
                "point positions must be finite".to_owned(),
            ));
        }
        self.allocate(ResourceKind::Points)
    }

    fn release(&mut self, resource: ResourceHandle) -> VizResult<()> {
        if !self.live.shift_remove(&resource) {
            return Err(VizError::Backend(format!(
                "resource {resource:?} released twice"
            )));
        }
        self.released.push(resource);
        Ok(())
    }

    fn draw(&mut self, surface: SurfaceHandle, frame: &SceneFrame) -> VizResult<()> {
        if !self.surfaces.contains_key(&surface) {
            return Err(VizError::Backend(format!("unknown surface {surface:?}")));
        }
        frame.validate()?;
        if let Some(stale) = frame.resources().find(|handle| !self.live.contains(handle)) {
            return Err(VizError::Backend(format!(
                "frame references released resource {stale:?}"
            )));
        }
        self.frames_drawn += 1;
        self.last_draw = Some(HeadlessDrawStats {
            frame_index: frame.index,
            mesh_count: frame.meshes.len(),
            points_count: frame.points.len(),
            light_count: frame.lights.len(),
        });
        Ok(())
    }
}
