use std::{sync::Arc, time::Instant};

use anyhow::{anyhow, Context};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowAttributes},
};

use crate::{
    config::{EditorConfig, Theme},
    editor::EditorContext,
    gfx::RenderEngine,
    ui::{field_panel, view_panel, PositionInspector, UiManager},
};

/// Longest frame step fed to the gizmo, in seconds
const MAX_FRAME_STEP: f32 = 0.1;

pub struct EditorApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: EditorConfig,
    theme: Theme,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    context: Option<EditorContext>,
    inspector: PositionInspector,
    cursor: (f32, f32),
    last_frame: Instant,
    error: Option<anyhow::Error>,
}

impl EditorApp {
    /// Creates the editor application; the window opens on `run`.
    pub fn new(config: EditorConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                theme: config.theme,
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                context: None,
                inspector: PositionInspector::new(),
                cursor: (0.0, 0.0),
                last_frame: Instant::now(),
                error: None,
            },
        })
    }

    /// Runs the event loop until the window closes.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow!("Event loop already consumed"))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("Event loop failed")?;

        match self.app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let (width, height) = self.config.window_size;
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(self.config.window_title.clone())
                    .with_inner_size(LogicalSize::new(width, height)),
            )
            .context("Failed to create window")?;
        let window_handle = Arc::new(window);

        let (width, height) = window_handle.inner_size().into();

        let window_clone = window_handle.clone();
        let mut renderer =
            pollster::block_on(async move { RenderEngine::new(window_clone, width, height).await })?;

        self.theme = resolve_theme(self.config.theme, &window_handle);
        renderer.set_clear_color(self.theme.clear_color());
        log::info!("Using {:?} theme", self.theme);

        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window_handle,
            self.theme,
        );

        let context = EditorContext::new(&self.config, renderer.overlay(), width, height)
            .context("Failed to create the orientation gizmo")?;

        self.context = Some(context);
        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        self.window = Some(window_handle);
        self.last_frame = Instant::now();
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_window(event_loop) {
            log::error!("Failed to start the editor: {:#}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (Some(render_engine), Some(context), Some(window)) = (
            self.render_engine.as_mut(),
            self.context.as_mut(),
            self.window.as_ref(),
        ) else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.cursor;
                if context.pointer_pressed(x, y) {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if let KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                } = key_event
                {
                    match key_code {
                        KeyCode::Escape => event_loop.exit(),
                        KeyCode::F11 => toggle_fullscreen(window),
                        _ => {}
                    }
                }
                context.camera_key_event(&key_event);
            }
            WindowEvent::ThemeChanged(system_theme) => {
                if self.config.theme == Theme::Auto {
                    self.theme = Theme::Auto.resolve(system_theme == winit::window::Theme::Dark);
                    render_engine.set_clear_color(self.theme.clear_color());
                    if let Some(ui_manager) = self.ui_manager.as_mut() {
                        ui_manager.apply_theme(self.theme);
                    }
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                context.resize(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_STEP);
                self.last_frame = now;

                context.update(dt);
                render_engine.begin_frame();
                context.render(render_engine.overlay());

                let inspector = &mut self.inspector;
                let result = match self.ui_manager.as_mut() {
                    Some(ui_manager) => render_engine.render_frame(Some(
                        |device: &wgpu::Device,
                         queue: &wgpu::Queue,
                         encoder: &mut wgpu::CommandEncoder,
                         color_attachment: &wgpu::TextureView| {
                            ui_manager.draw(
                                device,
                                queue,
                                encoder,
                                window,
                                color_attachment,
                                |ui| {
                                    field_panel(ui, context, inspector);
                                    view_panel(ui, context);
                                },
                            );
                        },
                    )),
                    None => render_engine.render_frame(
                        None::<
                            fn(
                                &wgpu::Device,
                                &wgpu::Queue,
                                &mut wgpu::CommandEncoder,
                                &wgpu::TextureView,
                            ),
                        >,
                    ),
                };

                if let Err(e) = result {
                    log::error!("Frame failed: {:#}", e);
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let (Some(window), Some(context)) = (self.window.as_ref(), self.context.as_mut()) else {
            return;
        };

        // Check if UI wants to capture input before processing camera events
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_input() {
                return;
            }
        }

        context.camera_device_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let (Some(context), Some(render_engine)) =
            (self.context.take(), self.render_engine.as_mut())
        {
            context.dispose(render_engine.overlay());
            log::debug!("Editor resources released");
        }
    }
}

fn resolve_theme(theme: Theme, window: &Window) -> Theme {
    let prefers_dark = matches!(window.theme(), Some(winit::window::Theme::Dark));
    theme.resolve(prefers_dark)
}

fn toggle_fullscreen(window: &Window) {
    if window.fullscreen().is_some() {
        window.set_fullscreen(None);
    } else {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    }
}
