//! # Scene Module
//!
//! Scene management: the camera, the drawable surface, and the wireframe
//! batch the particle field is projected into.

mod manager;
mod wireframe;

pub use manager::{RenderError, SceneManager};
pub use wireframe::{CameraUniform, WireVertex, WireframePipeline};
