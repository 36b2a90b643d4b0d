//! # Camera Module
//!
//! Perspective projection camera for the drift field.

mod perspective;

pub use perspective::{
    PerspectiveCamera, DEFAULT_DISTANCE, DEFAULT_FAR, DEFAULT_FOV, DEFAULT_NEAR,
};
