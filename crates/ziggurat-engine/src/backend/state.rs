use std::ops::{Deref, DerefMut};

use crate::canvas::Canvas;
use crate::coords::IRect;

/// Borrows a canvas and restores its viewport and clip state on drop.
///
/// The viewport is restored as it was set: a viewport that followed the
/// output keeps following it. The clip rect is restored when it was enabled at
/// snapshot time, otherwise clipping is disabled again.
pub struct CanvasStateGuard<'c, C: Canvas + ?Sized> {
    canvas: &'c mut C,
    clip_enabled: bool,
    viewport: Option<IRect>,
    clip_rect: IRect,
}

impl<'c, C: Canvas + ?Sized> CanvasStateGuard<'c, C> {
    pub fn new(canvas: &'c mut C) -> Self {
        let clip_enabled = canvas.is_clip_enabled();
        let viewport = canvas.viewport_override();
        let clip_rect = canvas.clip_rect();
        Self { canvas, clip_enabled, viewport, clip_rect }
    }
}

impl<C: Canvas + ?Sized> Deref for CanvasStateGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for CanvasStateGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for CanvasStateGuard<'_, C> {
    fn drop(&mut self) {
        self.canvas.set_viewport(self.viewport);
        let clip = self.clip_enabled.then_some(self.clip_rect);
        self.canvas.set_clip_rect(clip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{CanvasCall, RecordingCanvas};

    #[test]
    fn restores_enabled_clip() {
        let mut c = RecordingCanvas::new(100, 100);
        c.set_clip_rect(Some(IRect::new(1, 2, 3, 4)));
        {
            let mut g = CanvasStateGuard::new(&mut c);
            g.set_clip_rect(Some(IRect::new(50, 50, 10, 10)));
            g.set_viewport(Some(IRect::new(5, 5, 5, 5)));
        }
        assert!(c.is_clip_enabled());
        assert_eq!(c.clip_rect(), IRect::new(1, 2, 3, 4));
        assert_eq!(c.viewport(), IRect::new(0, 0, 100, 100));
    }

    // ── viewport ──────────────────────────────────────────────────────────

    #[test]
    fn default_viewport_is_not_pinned() {
        let mut c = RecordingCanvas::new(100, 100);
        {
            let mut g = CanvasStateGuard::new(&mut c);
            g.set_viewport(Some(IRect::new(5, 5, 5, 5)));
        }
        assert_eq!(c.viewport_override(), None);
        c.resize(300, 200);
        assert_eq!(c.viewport(), IRect::new(0, 0, 300, 200));
    }

    #[test]
    fn explicit_viewport_is_restored() {
        let mut c = RecordingCanvas::new(100, 100);
        c.set_viewport(Some(IRect::new(10, 20, 30, 40)));
        {
            let mut g = CanvasStateGuard::new(&mut c);
            g.set_viewport(None);
        }
        assert_eq!(c.viewport_override(), Some(IRect::new(10, 20, 30, 40)));
    }

    #[test]
    fn restores_disabled_clip() {
        let mut c = RecordingCanvas::new(100, 100);
        {
            let mut g = CanvasStateGuard::new(&mut c);
            g.set_clip_rect(Some(IRect::new(50, 50, 10, 10)));
        }
        assert!(!c.is_clip_enabled());
        assert_eq!(c.calls().last(), Some(&CanvasCall::SetClipRect(None)));
    }
}
