// Screen capture seam.
// Whatever owns the rendered frame implements `FrameCapture`; the recognizer
// only ever sees the snapshot through a `CapturedFrame`, which keeps overlay
// effects (the pointer trail) hidden for exactly as long as it is alive.

use std::ops::Deref;

use crate::types::FrameBuffer;

pub trait FrameCapture {
    /// Hide anything that must not end up in the captured pixels.
    fn hide_overlay(&mut self) {}

    /// Undo `hide_overlay`.
    fn show_overlay(&mut self) {}

    /// Snapshot of the current frame.
    fn capture_frame(&mut self) -> FrameBuffer;
}

/// A plain frame captures as itself.
impl FrameCapture for FrameBuffer {
    fn capture_frame(&mut self) -> FrameBuffer {
        self.clone()
    }
}

/// Scoped capture: overlay hidden on acquire, shown again on drop.
pub struct CapturedFrame<'a, C: FrameCapture + ?Sized> {
    source: &'a mut C,
    frame: FrameBuffer,
}

impl<'a, C: FrameCapture + ?Sized> CapturedFrame<'a, C> {
    pub fn acquire(source: &'a mut C) -> Self {
        source.hide_overlay();
        let frame = source.capture_frame();
        Self { source, frame }
    }
}

impl<C: FrameCapture + ?Sized> Deref for CapturedFrame<'_, C> {
    type Target = FrameBuffer;

    fn deref(&self) -> &FrameBuffer {
        &self.frame
    }
}

impl<C: FrameCapture + ?Sized> Drop for CapturedFrame<'_, C> {
    fn drop(&mut self) {
        self.source.show_overlay();
    }
}
