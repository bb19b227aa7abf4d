use std::fmt;

use glam::Vec3;
use tracing::{debug, trace, warn};

use crate::config::SceneConfig;
use crate::core::DataLayer;
use crate::error::{VizError, VizResult};
use crate::render::Color;
use crate::scene::{
    ATMOSPHERE_RADIUS, ATMOSPHERE_SEGMENTS, Blending, FrameLoop, Material, Mesh, MeshDraw,
    MountPoint, OrbitController, PerspectiveCamera, PointCloud, PointsDraw, RenderBackend,
    ResourceArena, ResourceHandle, SceneFrame, Shading, SphereGeometry, SurfaceHandle,
    SurfaceSize, atmosphere_material, scene_lights, starfield, wind_particles,
};
use crate::texture::{synthesize_overlay, synthesize_planet_texture};

const BACKGROUND: u32 = 0x0a0a0a;

const GLOBE_RADIUS: f32 = 1.0;
const GLOBE_SEGMENTS: u32 = 64;
const GLOBE_OPACITY: f64 = 0.9;

const OVERLAY_RADIUS: f32 = 1.01;
const OVERLAY_SEGMENTS: u32 = 32;
const OVERLAY_OPACITY: f64 = 0.7;

const PLANET_STREAM: u64 = 1;
const WIND_STREAM: u64 = 2;
const STAR_STREAM: u64 = 3;

/// Failed scene construction.
///
/// Hands the backend and mount back so the host can reuse them, for
/// example to show the static fallback. Anything allocated before the
/// failure has already been released.
pub struct SceneInitError<B, M> {
    pub error: VizError,
    pub backend: B,
    pub mount: M,
}

impl<B, M> fmt::Debug for SceneInitError<B, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneInitError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<B, M> fmt::Display for SceneInitError<B, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene initialization failed: {}", self.error)
    }
}

impl<B, M> std::error::Error for SceneInitError<B, M> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<B, M> From<SceneInitError<B, M>> for VizError {
    fn from(err: SceneInitError<B, M>) -> Self {
        err.error
    }
}

#[derive(Debug)]
struct SceneObjects {
    globe: Mesh,
    atmosphere: Mesh,
    overlay: Option<Mesh>,
    wind: PointCloud,
    wind_buffer: ResourceHandle,
    stars: PointCloud,
    stars_buffer: ResourceHandle,
}

/// Owner of the globe scene for one mount.
///
/// Holds the backend exclusively and every graphics resource it allocated
/// through it. `dispose` (also run on drop) cancels the frame loop,
/// detaches the surface and releases everything, once.
pub struct SceneManager<B: RenderBackend, M: MountPoint> {
    backend: B,
    mount: M,
    config: SceneConfig,
    surface: Option<SurfaceHandle>,
    surface_size: SurfaceSize,
    camera: PerspectiveCamera,
    controls: OrbitController,
    resources: ResourceArena,
    objects: Option<SceneObjects>,
    active_layer: DataLayer,
    frame_loop: FrameLoop,
}

impl<B: RenderBackend, M: MountPoint> SceneManager<B, M> {
    /// Builds the scene and attaches its surface to `mount`.
    pub fn init(
        mut backend: B,
        mut mount: M,
        config: SceneConfig,
    ) -> Result<Self, SceneInitError<B, M>> {
        let fail = |error, backend, mount| SceneInitError {
            error,
            backend,
            mount,
        };
        if let Err(error) = config.validate() {
            return Err(fail(error, backend, mount));
        }
        if !backend.supports_3d() {
            debug!(backend = backend.backend_name(), "3D context unavailable");
            return Err(fail(VizError::RenderingUnavailable, backend, mount));
        }

        let mut resources = ResourceArena::new();
        let mut surface = None;
        match build_scene(&mut backend, &mut mount, &config, &mut resources, &mut surface) {
            Ok((objects, surface_size)) => {
                let camera =
                    PerspectiveCamera::from_config(&config, surface_size.viewport.aspect());
                debug!(
                    backend = backend.backend_name(),
                    width = surface_size.viewport.width,
                    height = surface_size.viewport.height,
                    pixel_ratio = surface_size.pixel_ratio,
                    resources = resources.len(),
                    layer = config.initial_layer.key(),
                    "scene initialized"
                );
                Ok(Self {
                    backend,
                    mount,
                    surface,
                    surface_size,
                    camera,
                    controls: OrbitController::from_config(&config),
                    resources,
                    objects: Some(objects),
                    active_layer: config.initial_layer,
                    frame_loop: FrameLoop::new(),
                    config,
                })
            }
            Err(error) => {
                warn!(error = %error, "scene initialization failed, releasing partial state");
                if let Some(surface) = surface {
                    mount.detach_surface(surface);
                    if let Err(err) = backend.release_surface(surface) {
                        warn!(error = %err, "failed to release render surface");
                    }
                }
                resources.release_all(&mut backend);
                Err(fail(error, backend, mount))
            }
        }
    }

    /// Renders one frame. Returns `false` once disposed.
    pub fn tick(&mut self) -> VizResult<bool> {
        let (Some(surface), Some(objects)) = (self.surface, self.objects.as_mut()) else {
            return Ok(false);
        };
        let Some(index) = self.frame_loop.next_frame() else {
            return Ok(false);
        };

        objects.globe.rotation.y += self.config.globe_spin_per_frame;
        objects
            .wind
            .rotate(Vec3::new(0.0, self.config.wind_spin_per_frame, 0.0));
        objects.stars.rotate(Vec3::new(
            self.config.star_spin_x_per_frame,
            self.config.star_spin_y_per_frame,
            0.0,
        ));
        self.controls.update(&mut self.camera);

        let frame = compose_frame(index, self.surface_size, &self.camera, objects);
        self.backend.draw(surface, &frame)?;
        trace!(frame_index = index, meshes = frame.meshes.len(), "scene frame drawn");
        Ok(true)
    }

    /// Re-reads the mount size into the camera and surface.
    ///
    /// No-op once the surface is gone or while the mount reports an empty
    /// size.
    pub fn resize(&mut self) -> VizResult<()> {
        let Some(surface) = self.surface else {
            return Ok(());
        };
        let viewport = self.mount.size();
        if !viewport.is_valid() {
            debug!(
                width = viewport.width,
                height = viewport.height,
                "resize skipped for empty mount"
            );
            return Ok(());
        }
        let size = SurfaceSize::new(viewport, pixel_ratio(&self.mount, &self.config));
        self.backend.resize_surface(surface, size)?;
        self.camera.set_aspect(viewport.aspect());
        self.surface_size = size;
        trace!(width = viewport.width, height = viewport.height, "scene resized");
        Ok(())
    }

    /// Switches the overlay to `layer`.
    ///
    /// The new overlay is uploaded first. On failure the current overlay
    /// and active layer are left untouched; on success the previous overlay
    /// geometry and texture are released.
    pub fn set_layer(&mut self, layer: DataLayer) -> VizResult<()> {
        let Some(objects) = self.objects.as_mut() else {
            self.active_layer = layer;
            return Ok(());
        };
        if layer == self.active_layer && objects.overlay.is_some() {
            return Ok(());
        }

        let overlay = build_overlay(&mut self.backend, &mut self.resources, layer)?;
        let previous = objects.overlay.replace(overlay);
        self.active_layer = layer;

        if let Some(old) = previous {
            self.resources.release(&mut self.backend, old.geometry)?;
            if let Some(texture) = old.material.texture {
                self.resources.release(&mut self.backend, texture)?;
            }
        }
        debug!(layer = layer.key(), "data overlay rebuilt");
        Ok(())
    }

    /// Queues an orbit by `azimuth` and `polar` radians.
    pub fn rotate(&mut self, azimuth: f32, polar: f32) {
        self.controls.rotate(azimuth, polar);
    }

    pub fn pan(&mut self, right: f32, up: f32) {
        self.controls.pan(&self.camera, right, up);
    }

    /// Queues a zoom; factors above one move closer.
    pub fn zoom(&mut self, factor: f32) {
        self.controls.zoom(factor);
    }

    /// Tears the scene down. Safe to call more than once.
    pub fn dispose(&mut self) {
        if !self.frame_loop.cancel() {
            return;
        }
        if let Some(surface) = self.surface.take() {
            self.mount.detach_surface(surface);
            if let Err(err) = self.backend.release_surface(surface) {
                warn!(error = %err, "failed to release render surface");
            }
        }
        self.objects = None;
        let released = self.resources.release_all(&mut self.backend);
        debug!(
            released,
            frames = self.frame_loop.frames_issued(),
            "scene disposed"
        );
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        !self.frame_loop.is_active()
    }

    #[must_use]
    pub fn active_layer(&self) -> DataLayer {
        self.active_layer
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[must_use]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[must_use]
    pub fn controls(&self) -> &OrbitController {
        &self.controls
    }

    #[must_use]
    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.surface
    }

    #[must_use]
    pub fn surface_size(&self) -> SurfaceSize {
        self.surface_size
    }

    #[must_use]
    pub fn resources(&self) -> &ResourceArena {
        &self.resources
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frame_loop.frames_issued()
    }

    #[must_use]
    pub fn globe(&self) -> Option<&Mesh> {
        self.objects.as_ref().map(|objects| &objects.globe)
    }

    #[must_use]
    pub fn atmosphere(&self) -> Option<&Mesh> {
        self.objects.as_ref().map(|objects| &objects.atmosphere)
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&Mesh> {
        self.objects.as_ref().and_then(|objects| objects.overlay.as_ref())
    }

    #[must_use]
    pub fn wind_particles(&self) -> Option<&PointCloud> {
        self.objects.as_ref().map(|objects| &objects.wind)
    }

    #[must_use]
    pub fn starfield(&self) -> Option<&PointCloud> {
        self.objects.as_ref().map(|objects| &objects.stars)
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn mount(&self) -> &M {
        &self.mount
    }

    /// Mutable mount access, for hosts that resize the container.
    pub fn mount_mut(&mut self) -> &mut M {
        &mut self.mount
    }
}

impl<B: RenderBackend, M: MountPoint> Drop for SceneManager<B, M> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<B: RenderBackend, M: MountPoint> fmt::Debug for SceneManager<B, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneManager")
            .field("backend", &self.backend.backend_name())
            .field("surface", &self.surface)
            .field("surface_size", &self.surface_size)
            .field("active_layer", &self.active_layer)
            .field("resources", &self.resources.len())
            .field("frame_loop", &self.frame_loop)
            .finish_non_exhaustive()
    }
}

fn pixel_ratio(mount: &impl MountPoint, config: &SceneConfig) -> f64 {
    let ratio = mount.device_pixel_ratio();
    if ratio.is_finite() && ratio > 0.0 {
        ratio.min(config.max_pixel_ratio)
    } else {
        1.0
    }
}

fn build_scene<B: RenderBackend, M: MountPoint>(
    backend: &mut B,
    mount: &mut M,
    config: &SceneConfig,
    resources: &mut ResourceArena,
    surface_slot: &mut Option<SurfaceHandle>,
) -> VizResult<(SceneObjects, SurfaceSize)> {
    let viewport = mount.size();
    if !viewport.is_valid() {
        return Err(VizError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let surface_size = SurfaceSize::new(viewport, pixel_ratio(&*mount, config));
    let surface = backend.create_surface(surface_size)?;
    *surface_slot = Some(surface);
    mount.attach_surface(surface);

    let random = config.random_source;
    let planet = synthesize_planet_texture(random.stream(PLANET_STREAM))?;
    let globe_texture = resources.track(backend.upload_texture(&planet))?;
    let globe_geometry = resources.track(backend.upload_geometry(&SphereGeometry::new(
        GLOBE_RADIUS,
        GLOBE_SEGMENTS,
        GLOBE_SEGMENTS,
    )?))?;
    let globe = Mesh::new(
        globe_geometry,
        Material::new(Shading::Phong)
            .with_texture(globe_texture)
            .with_opacity(GLOBE_OPACITY),
    );

    let atmosphere_geometry = resources.track(backend.upload_geometry(&SphereGeometry::new(
        ATMOSPHERE_RADIUS,
        ATMOSPHERE_SEGMENTS,
        ATMOSPHERE_SEGMENTS,
    )?))?;
    let atmosphere = Mesh::new(atmosphere_geometry, atmosphere_material());

    let overlay = build_overlay(backend, resources, config.initial_layer)?;

    let wind = wind_particles(&mut random.stream(WIND_STREAM).rng());
    let wind_buffer = resources.track(backend.upload_points(wind.positions()))?;
    let stars = starfield(&mut random.stream(STAR_STREAM).rng());
    let stars_buffer = resources.track(backend.upload_points(stars.positions()))?;

    Ok((
        SceneObjects {
            globe,
            atmosphere,
            overlay: Some(overlay),
            wind,
            wind_buffer,
            stars,
            stars_buffer,
        },
        surface_size,
    ))
}

fn build_overlay<B: RenderBackend>(
    backend: &mut B,
    resources: &mut ResourceArena,
    layer: DataLayer,
) -> VizResult<Mesh> {
    let raster = synthesize_overlay(layer)?.into_raster();
    let texture = resources.track(backend.upload_texture(&raster))?;
    let upload = SphereGeometry::new(OVERLAY_RADIUS, OVERLAY_SEGMENTS, OVERLAY_SEGMENTS)
        .and_then(|sphere| backend.upload_geometry(&sphere));
    let geometry = match resources.track(upload) {
        Ok(geometry) => geometry,
        Err(error) => {
            if let Err(err) = resources.release(backend, texture) {
                warn!(error = %err, "failed to release orphaned overlay texture");
            }
            return Err(error);
        }
    };
    Ok(Mesh::new(
        geometry,
        Material::new(Shading::Unlit)
            .with_texture(texture)
            .with_opacity(OVERLAY_OPACITY)
            .with_blending(Blending::Additive),
    ))
}

fn compose_frame(
    index: u64,
    surface: SurfaceSize,
    camera: &PerspectiveCamera,
    objects: &SceneObjects,
) -> SceneFrame {
    let mesh_draw = |mesh: &Mesh| MeshDraw {
        geometry: mesh.geometry,
        material: mesh.material,
        model: mesh.model_matrix(),
    };
    let meshes = std::iter::once(&objects.globe)
        .chain(objects.overlay.as_ref())
        .chain(std::iter::once(&objects.atmosphere))
        .map(mesh_draw)
        .collect();
    let points = vec![
        PointsDraw {
            buffer: objects.wind_buffer,
            material: objects.wind.material(),
            model: objects.wind.model_matrix(),
        },
        PointsDraw {
            buffer: objects.stars_buffer,
            material: objects.stars.material(),
            model: objects.stars.model_matrix(),
        },
    ];
    SceneFrame {
        index,
        surface,
        background: Color::from_hex(BACKGROUND),
        view: camera.view_matrix(),
        projection: camera.projection_matrix(),
        camera_position: camera.position,
        lights: scene_lights().to_vec(),
        meshes,
        points,
    }
}
