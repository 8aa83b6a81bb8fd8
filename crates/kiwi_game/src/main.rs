//! KIWI LORE -- main loop and application entry point.
//!
//! Architecture: winit drives the event loop via `ApplicationHandler`. All simulation
//! runs inside `RedrawRequested` using a **fixed-timestep** model (see `FrameClock`):
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed accumulator
//!   2. `while should_step()` -- deliver input edges to the active screen, update it
//!   3. Apply the screen commands queued during the steps (resize, screen switch, music)
//!   4. Build the sprite mesh from the screen's draw list, upload the camera uniform,
//!      issue draw calls, then composite text and the debug overlay with egui
//!
//! Everything is laid out in logical pixels with the origin at the top-left.

mod assets;
mod audio;
mod config;
mod menu_screen;
mod play_screen;
#[cfg(test)]
mod replay;
mod scene;
mod screen;
mod textures;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use audio::BackgroundMusic;
use config::{GameConfig, DEFAULT_CONFIG_PATH};
use kiwi_core::{DrawList, FrameClock, GameMode, InputState, Key, MouseBtn, Resolution};
use kiwi_platform::window::{logical_size, set_window_size, PlatformConfig};
use kiwi_render::{
    clear_color, count_texture_binds, Camera2D, DrawCall, GpuContext, SpriteMesh,
    SpritePipeline, SpriteVertex,
};
use kiwi_ui::{OverlayStats, UiOverlay};
use menu_screen::MenuScreen;
use play_screen::PlayScreen;
use screen::{run_tick, ActiveScreen, ScreenCommand};
use textures::TextureCache;

const TICK_RATE: u32 = 60;

#[derive(Parser, Debug)]
#[command(name = "kiwi_game", version, about = "KIWI LORE, a 2D side-scroller")]
struct Args {
    /// Window width in logical pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Window height in logical pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Skip the menu and start playing (`story` or `multiplayer`).
    #[arg(long)]
    mode: Option<GameMode>,
    /// Game configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

/// All mutable engine state lives here. Constructed lazily in `ApplicationHandler::resumed`
/// once the window and GPU surface are available.
///
/// Ownership is split into three conceptual groups:
///  - **Core systems** (clock, input, camera, audio) -- updated every frame
///  - **Screens** (the active screen plus what survives switching: resolution, mute flag)
///  - **GPU resources** (textures, vertex/index/camera buffers, draw calls)
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    clock: FrameClock,
    input: InputState,
    camera: Camera2D,
    sprite_pipeline: SpritePipeline,
    overlay: UiOverlay,
    music: BackgroundMusic,

    // --- Screens ----------------------------------------------------------------
    config: GameConfig,
    screen: ActiveScreen,
    resolution: Resolution,
    muted: bool,
    pending: Vec<ScreenCommand>,

    // --- Per-frame GPU mesh state -----------------------------------------------
    // The sprite mesh is rebuilt on the CPU each frame, then streamed into these
    // GPU buffers. Buffers grow (power-of-two) but never shrink.
    textures: TextureCache,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    draw_list: DrawList,
    draw_calls: Vec<DrawCall>,
    quad_count: usize,
}

impl EngineState {
    fn new(
        window: Arc<Window>,
        config: GameConfig,
        resolution: Resolution,
        start_mode: Option<GameMode>,
    ) -> Self {
        let gpu = GpuContext::new(window.clone());
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let overlay = UiOverlay::new(&gpu.device, gpu.surface_format, &window);
        let textures = TextureCache::new(&gpu.device, &gpu.queue, &sprite_pipeline);
        let music = BackgroundMusic::new(&config.music);

        let viewport = logical_size(&window, window.inner_size());
        let camera = Camera2D::new(viewport.0 as f32, viewport.1 as f32);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let muted = false;
        let menu = MenuScreen::new(viewport, config.resolutions.clone(), resolution, muted);

        let mut state = Self {
            window,
            gpu,
            clock: FrameClock::new(TICK_RATE),
            input: InputState::new(),
            camera,
            sprite_pipeline,
            overlay,
            music,
            config,
            screen: ActiveScreen::Menu(menu),
            resolution,
            muted,
            pending: Vec::new(),
            textures,
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            draw_list: DrawList::default(),
            draw_calls: Vec::new(),
            quad_count: 0,
        };

        state.activate_screen();
        if let Some(mode) = start_mode {
            state.open_play(mode);
        }
        state.apply_commands();
        state.ensure_mesh_capacity(4, 6);
        state
    }

    fn viewport(&self) -> (f64, f64) {
        logical_size(&self.window, self.window.inner_size())
    }

    /// Title and init for the screen that was just installed.
    fn activate_screen(&mut self) {
        self.window.set_title(self.screen.as_screen().title());
        self.screen.as_screen_mut().init(&mut self.pending);
    }

    fn switch_to(&mut self, next: ActiveScreen) {
        log::info!("Screen: {} -> {}", self.screen.label(), next.label());
        self.screen = next;
        self.activate_screen();
    }

    fn open_menu(&mut self) {
        let menu = MenuScreen::new(
            self.viewport(),
            self.config.resolutions.clone(),
            self.resolution,
            self.muted,
        );
        self.switch_to(ActiveScreen::Menu(menu));
    }

    fn open_play(&mut self, mode: GameMode) {
        let viewport = self.viewport();
        let mut loader = self
            .textures
            .loader(&self.gpu.device, &self.gpu.queue, &self.sprite_pipeline);
        let play = PlayScreen::new(viewport, mode, &self.config, &mut loader);
        self.switch_to(ActiveScreen::Play(play));
    }

    /// Apply queued screen commands. Runs at the frame boundary, after the
    /// fixed steps, so a screen is never replaced mid-step.
    fn apply_commands(&mut self) {
        while !self.pending.is_empty() {
            for command in std::mem::take(&mut self.pending) {
                match command {
                    ScreenCommand::SetWindowSize(resolution) => {
                        self.resolution = resolution;
                        set_window_size(&self.window, resolution.width, resolution.height);
                    }
                    ScreenCommand::StartGame { resolution, mode } => {
                        self.resolution = resolution;
                        self.open_play(mode);
                    }
                    ScreenCommand::ReturnToMenu => self.open_menu(),
                    ScreenCommand::SetMusic { playing } => {
                        self.muted = !playing;
                        self.music.set_playing(playing);
                    }
                }
            }
        }
    }

    fn estimate_memory_mb(&self) -> f32 {
        let mut bytes = self.textures.memory_bytes();
        bytes += self.mesh_vertex_capacity * std::mem::size_of::<SpriteVertex>();
        bytes += self.mesh_index_capacity * std::mem::size_of::<u32>();
        bytes as f32 / (1024.0 * 1024.0)
    }

    fn rebuild_mesh(&mut self) {
        self.draw_list = self.screen.as_screen().render();
        let textures = &self.textures;
        let mesh = SpriteMesh::build(&self.draw_list, |key| textures.contains(key));
        self.ensure_mesh_capacity(mesh.vertices.len(), mesh.indices.len());
        self.quad_count = mesh.quad_count();

        if !mesh.vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&mesh.vertices));
        }
        if !mesh.indices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&mesh.indices));
        }
        self.draw_calls = mesh.draw_calls;
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    fn redraw(&mut self) {
        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            return;
        }

        // Fixed-step simulation phase.
        self.clock.begin_frame();
        while self.clock.should_step() {
            if self.input.is_just_pressed(Key::F3) {
                self.overlay.toggle_debug();
            }
            run_tick(
                self.screen.as_screen_mut(),
                &self.input,
                self.clock.fixed_dt,
                &mut self.pending,
            );
            // Each press is delivered to exactly one step. Frames with no
            // step keep their edges for the next frame.
            self.input.end_frame();
        }
        self.clock.end_frame();
        self.apply_commands();

        // Render phase reads finalized simulation state from this frame.
        self.rebuild_mesh();
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_uniform()]),
        );

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let stats = OverlayStats {
            screen_label: self.screen.label().to_string(),
            draw_calls: self.draw_calls.len() as u32,
            texture_binds: count_texture_binds(&self.draw_calls) as u32,
            quad_count: self.quad_count as u32,
            memory_estimate_mb: self.estimate_memory_mb(),
            screen_lines: self.screen.as_screen().debug_lines(),
        };
        let (egui_primitives, egui_textures_delta) =
            self.overlay
                .prepare(&self.window, &self.clock, &self.draw_list, &stats);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let background = self
                .draw_list
                .clear_color
                .map(clear_color)
                .unwrap_or(wgpu::Color::BLACK);
            let mut last_bound_texture_key: Option<&Arc<str>> = None;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            for draw in &self.draw_calls {
                let Some(texture) = self.textures.get(&draw.texture_key) else {
                    continue;
                };
                if last_bound_texture_key != Some(&draw.texture_key) {
                    render_pass.set_bind_group(1, &texture.bind_group, &[]);
                    last_bound_texture_key = Some(&draw.texture_key);
                }
                render_pass.draw_indexed(
                    draw.index_start..(draw.index_start + draw.index_count),
                    0,
                    0..1,
                );
            }
        }

        self.overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

struct App {
    args: Args,
    config: GameConfig,
    state: Option<EngineState>,
}

impl App {
    fn new(args: Args, config: GameConfig) -> Self {
        Self {
            args,
            config,
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let platform = PlatformConfig {
            width: self.args.width,
            height: self.args.height,
            ..PlatformConfig::default()
        };
        let window = kiwi_platform::window::create_window(event_loop, &platform);
        log::info!("Window created: {}x{}", platform.width, platform.height);
        self.state = Some(EngineState::new(
            window,
            self.config.clone(),
            Resolution::new(self.args.width, self.args.height),
            self.args.mode,
        ));
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state.overlay.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if physical_size.width > 0 && physical_size.height > 0 {
                    state.gpu.resize(physical_size.width, physical_size.height);
                    let (width, height) = logical_size(&state.window, physical_size);
                    state.camera.viewport = (width as f32, height as f32);
                    state.screen.as_screen_mut().on_resize(width, height);
                    log::info!(
                        "Resized to {}x{} (logical {}x{})",
                        physical_size.width,
                        physical_size.height,
                        width,
                        height
                    );
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(game_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(game_key),
                            ElementState::Released => state.input.key_up(game_key),
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(state.window.scale_factor());
                state.input.mouse_position = (logical.x, logical.y);
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } if !egui_consumed => {
                if let Some(btn) = map_mouse_button(button) {
                    match button_state {
                        ElementState::Pressed => state.input.mouse_down(btn),
                        ElementState::Released => state.input.mouse_up(btn),
                    }
                }
            }

            WindowEvent::RedrawRequested => state.redraw(),

            _ => {}
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Space => Some(Key::Space),
        KeyCode::F3 => Some(Key::F3),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyM => Some(Key::M),
        _ => None,
    }
}

fn map_mouse_button(button: MouseButton) -> Option<MouseBtn> {
    match button {
        MouseButton::Left => Some(MouseBtn::Left),
        MouseButton::Right => Some(MouseBtn::Right),
        MouseButton::Middle => Some(MouseBtn::Middle),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("KIWI LORE starting...");
    let config = config::load_or_default(&args.config);

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(args, config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
