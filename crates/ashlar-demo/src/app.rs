//! Windowed application shell: winit event loop glue driving the wgpu
//! backend once per frame.

use std::sync::Arc;

use ashlar_engine::backend::gpu::{RenderCtx, RenderTarget};
use ashlar_engine::backend::WgpuBackend;
use ashlar_engine::coords::{Rect, Vec2, Viewport};
use ashlar_engine::paint::Color;
use ashlar_engine::render::Dispatcher;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, SurfaceErrorAction};
use crate::resources::Resources;
use crate::ui::{self, ScrollDrag, UiState};

/// Scroll speed for one wheel "line".
const WHEEL_LINE_PX: f32 = 40.0;

pub struct App {
    resources: Resources,
    state: UiState,

    // Geometry fed back from the previous frame's scene for hit testing.
    thumb: Rect,
    max_scroll: f32,
    drag_ratio: f32,

    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    backend: WgpuBackend,
    dispatcher: Dispatcher,
    initial_size: (u32, u32),
}

impl App {
    pub fn new(resources: Resources, initial_size: (u32, u32)) -> Self {
        Self {
            resources,
            state: UiState::default(),
            thumb: Rect::default(),
            max_scroll: 0.0,
            drag_ratio: 0.0,
            window: None,
            gpu: None,
            backend: WgpuBackend::new(),
            dispatcher: Dispatcher::new(),
            initial_size,
        }
    }

    fn scale_factor(&self) -> f32 {
        self.window.as_ref().map_or(1.0, |w| w.scale_factor() as f32)
    }

    fn scroll_by(&mut self, delta: f32) {
        self.state.scroll_offset = (self.state.scroll_offset + delta).clamp(0.0, self.max_scroll);
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu)) = (self.window.as_ref(), self.gpu.as_mut()) else {
            return;
        };

        let size = gpu.size();
        if size.width == 0 || size.height == 0 {
            return;
        }

        let scale = window.scale_factor() as f32;
        let viewport = Viewport::new(size.width as f32 / scale, size.height as f32 / scale);

        let scene = ui::build_scene(
            viewport,
            &self.state,
            &self.resources.fonts,
            self.resources.body_font,
            self.resources.profile_picture,
        );
        self.thumb = scene.scrollbar_thumb;
        self.max_scroll = scene.max_scroll;
        self.drag_ratio = scene.drag_ratio;
        self.state.scroll_offset = self.state.scroll_offset.clamp(0.0, self.max_scroll);

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(e) => match gpu.handle_surface_error(e) {
                SurfaceErrorAction::Fatal => {
                    log::error!("surface error is fatal; shutting down");
                    event_loop.exit();
                    return;
                }
                SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => return,
            },
        };

        self.backend.begin_frame();
        self.dispatcher
            .dispatch(&mut self.backend, scene.commands.commands());

        let ctx = RenderCtx {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
            viewport,
            scale_factor: scale,
        };
        {
            let mut target = RenderTarget {
                encoder: &mut frame.encoder,
                color_view: &frame.view,
            };
            self.backend.flush(
                &ctx,
                &mut target,
                Color::BLACK,
                &self.resources.fonts,
                &self.resources.textures,
            );
        }

        gpu.submit(frame);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (w, h) = self.initial_size;
        let attrs = Window::default_attributes()
            .with_title("Ashlar — layout renderer demo")
            .with_inner_size(LogicalSize::new(w as f64, h as f64));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(Gpu::new(Arc::clone(&window))) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("GPU initialization failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw keeps the demo simple; an invalidation scheme is
        // not worth the plumbing here.
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size);
                }
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let (Some(window), Some(gpu)) = (self.window.as_ref(), self.gpu.as_mut()) {
                    gpu.resize(window.inner_size());
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let scale = self.scale_factor();
                self.state.pointer =
                    Vec2::new(position.x as f32 / scale, position.y as f32 / scale);

                if let Some(drag) = self.state.scrollbar_drag {
                    let delta = (self.state.pointer.y - drag.grab_y) * self.drag_ratio;
                    self.state.scroll_offset =
                        (drag.scroll_origin + delta).clamp(0.0, self.max_scroll);
                }
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                ElementState::Pressed => {
                    if self.thumb.contains(self.state.pointer) {
                        self.state.scrollbar_drag = Some(ScrollDrag {
                            grab_y: self.state.pointer.y,
                            scroll_origin: self.state.scroll_offset,
                        });
                    }
                }
                ElementState::Released => {
                    self.state.scrollbar_drag = None;
                }
            },

            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / self.scale_factor(),
                };
                self.scroll_by(-dy);
            }

            WindowEvent::RedrawRequested => self.frame(event_loop),

            _ => {}
        }
    }
}
