use anyhow::Context;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::render::{RenderCtx, RenderLoop, SceneDesc};

/// Runs one scene: builds its render loop when the window is ready, then ticks
/// and draws it on every scheduled frame.
pub struct DemoApp {
    scene: SceneDesc,
    render_loop: Option<RenderLoop>,
}

impl DemoApp {
    pub fn new(scene: SceneDesc) -> Self {
        Self {
            scene,
            render_loop: None,
        }
    }
}

impl App for DemoApp {
    fn on_init(&mut self, _window_id: WindowId, ctx: &RenderCtx<'_>) -> anyhow::Result<()> {
        let render_loop = RenderLoop::new(ctx, &self.scene)
            .with_context(|| format!("failed to set up scene `{}`", self.scene.label))?;
        self.render_loop = Some(render_loop);
        Ok(())
    }

    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if is_exit_key(event.physical_key, event.state) =>
            {
                log::info!("escape pressed; stopping");
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl> {
        let Some(render_loop) = self.render_loop.as_mut() else {
            return Ok(AppControl::Continue);
        };

        render_loop.tick(ctx.time.dt_millis());
        Ok(ctx.render(|rctx, target| render_loop.render_frame(rctx, target)))
    }
}

fn is_exit_key(key: PhysicalKey, state: ElementState) -> bool {
    state == ElementState::Pressed && key == PhysicalKey::Code(KeyCode::Escape)
}
