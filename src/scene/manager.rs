//! Scene management: camera, drawable surface, and frame rendering.

use thiserror::Error;

use super::wireframe::{WireVertex, WireframePipeline};
use crate::camera::PerspectiveCamera;
use crate::core::{Context, ContextError, Id, RenderConfig};
use crate::field::{Particle, OPACITY};
use crate::math::Matrix4;

/// Errors that can occur while rendering a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The surface lost or failed to provide the current texture.
    #[error("Failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Owns the camera and the drawable surface, and projects the current particle
/// state into it each tick.
///
/// The surface, camera, and pipeline are created once at initialization and
/// only mutated in place afterwards; resize never recreates them.
pub struct SceneManager {
    /// Unique identifier.
    id: Id,
    /// The perspective camera. Lives from construction so viewport geometry
    /// stays inspectable even while GPU initialization is deferred.
    camera: PerspectiveCamera,
    /// The wgpu context, present once initialized against a mount surface.
    context: Option<Context>,
    /// The wireframe batch pipeline, present alongside the context.
    wireframe: Option<WireframePipeline>,
    /// Per-frame vertex scratch, reused across ticks.
    scratch: Vec<WireVertex>,
    /// Render configuration.
    config: RenderConfig,
    /// Current viewport width.
    width: u32,
    /// Current viewport height (coerced to at least 1).
    height: u32,
    /// Initialization guard: set when the surface is live.
    initialized: bool,
    /// Terminal teardown flag.
    torn_down: bool,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl SceneManager {
    /// Create an uninitialized manager.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            id: Id::new(),
            camera: PerspectiveCamera::default(),
            context: None,
            wireframe: None,
            scratch: Vec::new(),
            config,
            width: 0,
            height: 1,
            initialized: false,
            torn_down: false,
        }
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Allocate the drawable surface and pipeline against a mount target.
    ///
    /// Safe to call before the host surface exists: with `target = None` the
    /// viewport and camera are configured but setup is skipped without error,
    /// to be retried on the next mount signal. Re-initializing a live manager
    /// is a no-op. Returns whether the manager is initialized after the call.
    pub async fn initialize<W>(
        &mut self,
        target: Option<W>,
        width: u32,
        height: u32,
    ) -> Result<bool, ContextError>
    where
        W: Into<wgpu::SurfaceTarget<'static>>,
    {
        if self.torn_down {
            log::warn!("initialize called on torn-down scene manager");
            return Ok(false);
        }
        if self.initialized {
            return Ok(true);
        }

        self.set_viewport(width, height);

        let Some(target) = target else {
            log::debug!("mount surface unavailable, deferring initialization");
            return Ok(false);
        };

        let context = Context::new(target, self.width, self.height, &self.config).await?;
        let wireframe = WireframePipeline::new(&context.device, context.surface_format);

        self.context = Some(context);
        self.wireframe = Some(wireframe);
        self.initialized = true;
        log::info!("scene initialized at {}x{}", self.width, self.height);
        Ok(true)
    }

    /// Draw the current state of every particle against the camera.
    ///
    /// Pure projection: particle data is never mutated. A manager without a
    /// live surface skips the frame.
    pub fn render(&mut self, particles: &[Particle]) -> Result<(), RenderError> {
        let Some(context) = &self.context else {
            return Ok(());
        };
        let Some(wireframe) = &mut self.wireframe else {
            return Ok(());
        };

        self.scratch.clear();
        for particle in particles {
            let model = Matrix4::compose(&particle.position, &particle.orientation);
            let color = particle.color.to_rgba(OPACITY);
            for vertex in particle.edges() {
                self.scratch.push(WireVertex {
                    position: model.transform_point(vertex).to_array(),
                    color,
                });
            }
        }

        wireframe.write_camera(&context.queue, self.camera.view_projection_matrix());
        wireframe.upload(&context.device, &context.queue, &self.scratch);

        let output = context.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context.create_command_encoder();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Field Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            wireframe.draw(&mut render_pass);
        }

        context.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Update surface dimensions and camera aspect ratio in place.
    /// Degenerate heights are coerced to 1; nothing is reallocated.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.set_viewport(width, height);
        if let Some(context) = &mut self.context {
            context.resize(self.width, self.height);
        }
    }

    /// Detach and release all held drawing resources. Idempotent and valid in
    /// any state; the manager is terminal afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        if self.initialized {
            log::info!("scene torn down");
        }
        self.wireframe = None;
        self.context = None;
        self.scratch = Vec::new();
        self.initialized = false;
        self.torn_down = true;
    }

    /// The camera.
    #[inline]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Whether a live surface is attached.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the manager has been torn down.
    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Current viewport width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Current viewport height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height.max(1);
        self.camera.set_aspect(self.width as f32 / self.height as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deferred_manager() -> SceneManager {
        let mut manager = SceneManager::default();
        let initialized = pollster::block_on(manager.initialize(
            None::<wgpu::SurfaceTarget<'static>>,
            800,
            600,
        ))
        .unwrap();
        assert!(!initialized);
        manager
    }

    #[test]
    fn test_initialize_without_surface_defers() {
        let manager = deferred_manager();
        assert!(!manager.is_initialized());
        assert!(!manager.is_torn_down());
        assert_eq!(manager.width(), 800);
        assert_eq!(manager.height(), 600);
    }

    #[test]
    fn test_resize_updates_camera_aspect_exactly() {
        let mut manager = deferred_manager();
        manager.resize(1920, 1080);
        assert_eq!(manager.camera().aspect, 1920.0 / 1080.0);
        manager.resize(333, 777);
        assert_eq!(manager.camera().aspect, 333.0 / 777.0);
    }

    #[test]
    fn test_zero_height_coerced_to_one() {
        let mut a = deferred_manager();
        let mut b = deferred_manager();
        a.resize(640, 0);
        b.resize(640, 1);
        assert_eq!(a.camera().aspect, b.camera().aspect);
        assert_eq!(a.height(), 1);
    }

    #[test]
    fn test_render_without_surface_is_noop() {
        let mut manager = deferred_manager();
        manager.render(&[]).unwrap();
    }

    #[test]
    fn test_teardown_is_idempotent_from_any_state() {
        let mut manager = SceneManager::default();
        manager.teardown();
        assert!(manager.is_torn_down());
        manager.teardown();
        assert!(manager.is_torn_down());

        // Initialization after teardown stays off without raising.
        let initialized = pollster::block_on(manager.initialize(
            None::<wgpu::SurfaceTarget<'static>>,
            100,
            100,
        ))
        .unwrap();
        assert!(!initialized);
        assert!(!manager.is_initialized());
    }
}
