//! # Viewport Module
//!
//! Forwards host viewport-dimension notifications to the scene manager.

use crate::scene::SceneManager;

/// Listens for host viewport size changes and forwards new dimensions to the
/// scene manager while subscribed.
#[derive(Debug, Default)]
pub struct ViewportResizeHandler {
    /// Whether notifications are currently forwarded.
    subscribed: bool,
}

impl ViewportResizeHandler {
    /// Create an unsubscribed handler.
    pub fn new() -> Self {
        Self { subscribed: false }
    }

    /// Register for viewport-dimension-changed notifications. Idempotent.
    pub fn subscribe(&mut self) {
        self.subscribed = true;
    }

    /// Remove the registration. Idempotent and safe if never subscribed.
    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    /// Whether notifications are being forwarded.
    #[inline]
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Deliver a notification with the host's current dimensions.
    /// Ignored while unsubscribed.
    pub fn notify(&mut self, width: u32, height: u32, scene: &mut SceneManager) {
        if !self.subscribed {
            return;
        }
        log::trace!("viewport resized to {}x{}", width, height);
        scene.resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SceneManager {
        let mut manager = SceneManager::default();
        let _ = pollster::block_on(manager.initialize(
            None::<wgpu::SurfaceTarget<'static>>,
            640,
            480,
        ))
        .unwrap();
        manager
    }

    #[test]
    fn test_notify_forwards_while_subscribed() {
        let mut scene = manager();
        let mut handler = ViewportResizeHandler::new();
        handler.subscribe();
        handler.notify(1024, 512, &mut scene);
        assert_eq!(scene.camera().aspect, 2.0);
    }

    #[test]
    fn test_notify_ignored_while_unsubscribed() {
        let mut scene = manager();
        let mut handler = ViewportResizeHandler::new();
        handler.notify(1024, 512, &mut scene);
        assert_eq!(scene.width(), 640);
        assert_eq!(scene.height(), 480);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let mut handler = ViewportResizeHandler::new();
        handler.unsubscribe();
        handler.subscribe();
        handler.unsubscribe();
        handler.unsubscribe();
        assert!(!handler.is_subscribed());
    }
}
