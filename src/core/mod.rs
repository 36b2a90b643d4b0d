//! # Core Module
//!
//! Engine lifecycle, the wgpu context, tick scheduling, and object identity.

mod context;
mod engine;
mod id;
mod scheduler;

pub use context::{Context, ContextError};
pub use engine::{Engine, EngineConfig, Lifecycle};
pub use id::Id;
pub use scheduler::{AnimationScheduler, FrameHandle};

/// Surface and presentation configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Request an alpha-composited surface so the host page shows through.
    pub alpha: bool,
    /// Adapter power preference.
    pub power_preference: wgpu::PowerPreference,
    /// Presentation mode.
    pub present_mode: wgpu::PresentMode,
    /// Per-frame clear color.
    pub clear_color: wgpu::Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            alpha: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            present_mode: wgpu::PresentMode::AutoVsync,
            clear_color: wgpu::Color::TRANSPARENT,
        }
    }
}
