//! Backend-agnostic 3D globe scene.
//!
//! The scene owns its render surface and every graphics resource through
//! explicit handles. Frames are produced by explicit `tick` calls from the
//! host loop; nothing reschedules itself.

mod arena;
mod atmosphere;
mod backend;
mod camera;
mod controls;
mod fallback;
mod frame;
mod frame_loop;
mod manager;
mod mesh;
mod mount;
mod particles;
mod view;

pub use arena::ResourceArena;
pub use atmosphere::{
    ATMOSPHERE_RADIUS, ATMOSPHERE_SEGMENTS, GLOW_BIAS, atmosphere_material, glow_color,
    glow_intensity,
};
pub use backend::{
    HeadlessBackend, HeadlessDrawStats, RenderBackend, ResourceHandle, ResourceKind,
    SurfaceHandle, SurfaceSize,
};
pub use camera::PerspectiveCamera;
pub use controls::{OrbitController, Spherical};
pub use fallback::{StaticSummary, SummaryItem};
pub use frame::{Light, MeshDraw, PointsDraw, SceneFrame, scene_lights};
pub use frame_loop::FrameLoop;
pub use manager::{SceneInitError, SceneManager};
pub use mesh::{Blending, Material, Mesh, Shading, Side, SphereGeometry};
pub use mount::{HeadlessMount, MountPoint};
pub use particles::{
    PointCloud, PointsMaterial, STAR_COUNT, STARFIELD_EXTENT, WIND_PARTICLE_COUNT,
    WIND_SHELL_RADIUS, WIND_SPEED_SPAN, starfield, wind_particles,
};
pub use view::GlobeView;
