//! Engine entry point: explicit lifecycle over the whole subsystem.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::scheduler::{AnimationScheduler, FrameHandle};
use super::{ContextError, RenderConfig};
use crate::field::{ParticleField, DEFAULT_COUNT};
use crate::scene::{RenderError, SceneManager};
use crate::viewport::ViewportResizeHandler;

/// Lifecycle states of the subsystem.
///
/// `Running` is entered at most once per engine; `TornDown` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, or mount deferred because the host surface was unavailable.
    Uninitialized,
    /// Mounted with a live surface, loop armed.
    Running,
    /// Unmounted; terminal.
    TornDown,
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of particles generated at mount.
    pub particle_count: usize,
    /// RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Render configuration.
    #[serde(skip)]
    pub render: RenderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_COUNT,
            seed: None,
            render: RenderConfig::default(),
        }
    }
}

/// The drift field engine.
///
/// Owns the particle field, scene manager, scheduler, and resize handler, and
/// drives them through an explicit mount → frames → unmount lifecycle. The
/// host signals every transition; nothing happens as a re-render side effect.
pub struct Engine {
    /// The particle field.
    field: ParticleField,
    /// The scene manager.
    scene: SceneManager,
    /// The tick scheduler.
    scheduler: AnimationScheduler,
    /// The viewport resize handler.
    resize_handler: ViewportResizeHandler,
    /// Cancellation handle for the active loop.
    frame_handle: Option<FrameHandle>,
    /// Current lifecycle state.
    lifecycle: Lifecycle,
    /// Configuration captured at construction.
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Create an unmounted engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            field: ParticleField::new(),
            scene: SceneManager::new(config.render.clone()),
            scheduler: AnimationScheduler::new(),
            resize_handler: ViewportResizeHandler::new(),
            frame_handle: None,
            lifecycle: Lifecycle::Uninitialized,
            config,
        }
    }

    /// Mount against a host surface: initialize the scene, generate the field,
    /// subscribe to resize notifications, and arm the loop.
    ///
    /// With `target = None` (host surface not yet available) the engine skips
    /// setup without raising and stays `Uninitialized`, ready for the next
    /// mount signal. Mounting while `Running` or after teardown is a no-op.
    /// Returns whether the engine is running after the call.
    pub async fn mount<W>(
        &mut self,
        target: Option<W>,
        width: u32,
        height: u32,
    ) -> Result<bool, ContextError>
    where
        W: Into<wgpu::SurfaceTarget<'static>>,
    {
        match self.lifecycle {
            Lifecycle::Running => return Ok(true),
            Lifecycle::TornDown => return Ok(false),
            Lifecycle::Uninitialized => {}
        }

        if !self.scene.initialize(target, width, height).await? {
            return Ok(false);
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.field.generate(self.config.particle_count, &mut rng);

        self.resize_handler.subscribe();
        self.frame_handle = Some(self.scheduler.start());
        self.lifecycle = Lifecycle::Running;
        log::info!("engine mounted with {} particles", self.field.len());
        Ok(true)
    }

    /// Deliver one display-refresh callback: advance the field, then render.
    /// A no-op returning `Ok(false)` unless running.
    pub fn frame(&mut self) -> Result<bool, RenderError> {
        self.scheduler.run_frame(&mut self.field, &mut self.scene)
    }

    /// Deliver a host viewport-dimension-changed notification.
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.resize_handler.notify(width, height, &mut self.scene);
    }

    /// Unmount: cancel the loop, unsubscribe from resize notifications,
    /// dispose the field, and tear down the scene — in that order.
    /// Idempotent and valid from any state.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            self.scheduler.cancel(&handle);
        }
        self.resize_handler.unsubscribe();
        self.field.dispose();
        self.scene.teardown();
        if self.lifecycle != Lifecycle::TornDown {
            log::info!("engine unmounted");
        }
        self.lifecycle = Lifecycle::TornDown;
    }

    /// Current lifecycle state.
    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The particle field.
    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// The scene manager.
    #[inline]
    pub fn scene(&self) -> &SceneManager {
        &self.scene
    }

    /// Ticks delivered so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.scheduler.ticks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount_deferred(engine: &mut Engine) -> bool {
        pollster::block_on(engine.mount(None::<wgpu::SurfaceTarget<'static>>, 800, 600)).unwrap()
    }

    #[test]
    fn test_mount_without_surface_stays_uninitialized() {
        let mut engine = Engine::default();
        assert!(!mount_deferred(&mut engine));
        assert_eq!(engine.lifecycle(), Lifecycle::Uninitialized);
        assert!(engine.field().is_empty());

        // The mount signal can be retried.
        assert!(!mount_deferred(&mut engine));
        assert_eq!(engine.lifecycle(), Lifecycle::Uninitialized);
    }

    #[test]
    fn test_frame_before_mount_is_noop() {
        let mut engine = Engine::default();
        assert!(!engine.frame().unwrap());
        assert_eq!(engine.ticks(), 0);
    }

    #[test]
    fn test_unmount_is_idempotent_from_any_state() {
        let mut engine = Engine::default();
        engine.unmount();
        assert_eq!(engine.lifecycle(), Lifecycle::TornDown);
        engine.unmount();
        assert_eq!(engine.lifecycle(), Lifecycle::TornDown);

        // Mount after teardown is refused without raising.
        assert!(!mount_deferred(&mut engine));
        assert_eq!(engine.lifecycle(), Lifecycle::TornDown);
    }

    #[test]
    fn test_resize_before_mount_is_ignored() {
        let mut engine = Engine::default();
        mount_deferred(&mut engine);
        let aspect = engine.scene().camera().aspect;
        engine.handle_resize(100, 100);
        // Not subscribed until mounted; notification is dropped.
        assert_eq!(engine.scene().camera().aspect, aspect);
    }

    #[test]
    fn test_seeded_config_is_deterministic() {
        let config = EngineConfig {
            particle_count: 5,
            seed: Some(1234),
            render: RenderConfig::default(),
        };
        let mut rng_a = StdRng::seed_from_u64(config.seed.unwrap());
        let mut rng_b = StdRng::seed_from_u64(config.seed.unwrap());

        let mut a = ParticleField::new();
        let mut b = ParticleField::new();
        a.generate(config.particle_count, &mut rng_a);
        b.generate(config.particle_count, &mut rng_b);

        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.linear_velocity, pb.linear_velocity);
            assert_eq!(pa.color, pb.color);
        }
    }
}
