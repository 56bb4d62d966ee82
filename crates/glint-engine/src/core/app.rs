use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;
use crate::render::RenderCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// An error returned from any callback is terminal: the runtime logs it, closes
/// the event loop and returns it from [`crate::window::Runtime::run`].
pub trait App {
    /// Called once per window after its graphics context exists and before its
    /// first frame. Shader compilation and geometry upload belong here.
    fn on_init(&mut self, window_id: WindowId, ctx: &RenderCtx<'_>) -> anyhow::Result<()> {
        let _ = (window_id, ctx);
        Ok(())
    }

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per scheduled frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl>;
}
