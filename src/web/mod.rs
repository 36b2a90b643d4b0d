//! Web bindings for the drift field.
//!
//! This module provides JavaScript-friendly APIs via wasm-bindgen. The host
//! page owns the refresh loop: it constructs a [`DriftApp`] against a canvas,
//! calls [`DriftApp::frame`] from its `requestAnimationFrame` callback, and
//! forwards window resize events.

use wasm_bindgen::prelude::*;
use web_sys::{window, HtmlCanvasElement};

use crate::core::{Engine, EngineConfig, Lifecycle};

/// The drift field application for web environments.
#[wasm_bindgen]
pub struct DriftApp {
    engine: Engine,
}

#[wasm_bindgen]
impl DriftApp {
    /// Create a drift field mounted on a canvas element.
    #[wasm_bindgen]
    pub async fn new(canvas_id: &str) -> Result<DriftApp, JsValue> {
        let window = window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("Canvas '{}' not found", canvas_id)))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("Element is not a canvas"))?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;

        canvas.set_width(width);
        canvas.set_height(height);

        let mut engine = Engine::new(EngineConfig::default());
        engine
            .mount(
                Some(wgpu::SurfaceTarget::Canvas(canvas)),
                width,
                height,
            )
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to mount: {}", e)))?;

        Ok(DriftApp { engine })
    }

    /// Deliver one animation frame: advance the field, then draw it.
    /// Returns whether the frame ran.
    #[wasm_bindgen]
    pub fn frame(&mut self) -> Result<bool, JsValue> {
        self.engine
            .frame()
            .map_err(|e| JsValue::from_str(&format!("Render failed: {}", e)))
    }

    /// Handle window resize.
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.handle_resize(width, height);
    }

    /// Stop the loop and release every held resource. Idempotent.
    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.engine.unmount();
    }

    /// Whether the field is mounted and running.
    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.engine.lifecycle() == Lifecycle::Running
    }

    /// Number of live particles.
    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.engine.field().len()
    }

    /// Frames delivered since mount.
    #[wasm_bindgen]
    pub fn ticks(&self) -> u64 {
        self.engine.ticks()
    }
}
