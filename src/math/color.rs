//! Color implementation.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGB color with values in 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    /// Red component (0.0 to 1.0).
    pub r: f32,
    /// Green component (0.0 to 1.0).
    pub g: f32,
    /// Blue component (0.0 to 1.0).
    pub b: f32,
}

impl Color {
    /// Black (0, 0, 0).
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    /// White (1, 1, 1).
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a new color from RGB values (0.0-1.0).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self { r: a[0], g: a[1], b: a[2] }
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to an RGBA array with the given alpha.
    #[inline]
    pub const fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl From<[f32; 3]> for Color {
    fn from(a: [f32; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Color> for [f32; 3] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_carries_alpha() {
        let c = Color::new(0.5, 0.6, 0.9);
        assert_eq!(c.to_rgba(0.7), [0.5, 0.6, 0.9, 0.7]);
    }
}
