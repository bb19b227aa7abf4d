use crate::core::Viewport;
use crate::scene::SurfaceHandle;

/// Host container a scene renders into.
pub trait MountPoint {
    /// Current logical size of the container.
    fn size(&self) -> Viewport;

    fn device_pixel_ratio(&self) -> f64;

    fn attach_surface(&mut self, surface: SurfaceHandle);

    fn detach_surface(&mut self, surface: SurfaceHandle);
}

/// In-memory mount point that records attach and detach calls.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMount {
    size: Viewport,
    device_pixel_ratio: f64,
    attached: Option<SurfaceHandle>,
    attach_calls: usize,
    detach_calls: usize,
}

impl HeadlessMount {
    #[must_use]
    pub fn new(size: Viewport, device_pixel_ratio: f64) -> Self {
        Self {
            size,
            device_pixel_ratio,
            attached: None,
            attach_calls: 0,
            detach_calls: 0,
        }
    }

    /// Simulates the host resizing the container.
    pub fn set_size(&mut self, size: Viewport) {
        self.size = size;
    }

    #[must_use]
    pub fn attached(&self) -> Option<SurfaceHandle> {
        self.attached
    }

    #[must_use]
    pub fn attach_calls(&self) -> usize {
        self.attach_calls
    }

    #[must_use]
    pub fn detach_calls(&self) -> usize {
        self.detach_calls
    }
}

impl MountPoint for HeadlessMount {
    fn size(&self) -> Viewport {
        self.size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn attach_surface(&mut self, surface: SurfaceHandle) {
        self.attach_calls += 1;
        self.attached = Some(surface);
    }

    fn detach_surface(&mut self, surface: SurfaceHandle) {
        self.detach_calls += 1;
        if self.attached == Some(surface) {
            self.attached = None;
        }
    }
}
