//! # Driftfield - Procedural Wireframe Drift Field
//!
//! Driftfield renders a field of slowly drifting, rotating wireframe boxes
//! behind a host UI, targeting WebGPU through wgpu. The simulation is purely
//! decorative: particles drift, spin, and reflect off an invisible boundary,
//! drawn as alpha-blended line batches over a transparent surface.
//!
//! The host drives everything explicitly. It mounts the engine against a
//! surface, delivers one [`Engine::frame`](core::Engine::frame) per display
//! refresh, forwards viewport resizes, and unmounts when the field should
//! disappear.
//!
//! ## Example
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.mount(Some(surface_target), width, height).await?;
//!
//! // Once per display-refresh callback:
//! engine.frame()?;
//!
//! // On window resize:
//! engine.handle_resize(new_width, new_height);
//!
//! // When the field goes away:
//! engine.unmount();
//! ```

#![warn(missing_docs)]

#[cfg(feature = "web")]
use wasm_bindgen::prelude::*;

pub mod math;
pub mod core;
pub mod field;
pub mod camera;
pub mod scene;
pub mod viewport;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::camera::*;
    pub use crate::core::*;
    pub use crate::field::*;
    pub use crate::math::*;
    pub use crate::scene::*;
    pub use crate::viewport::*;
}

/// Initialize the crate for WASM environments.
/// Sets up panic hooks for better error messages in the browser console.
#[cfg(feature = "web")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "Driftfield";
