use anyhow::Result;
use glam::Mat4;
use std::sync::Arc;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, ModifiersState},
    window::Window,
};

use tabletop::{controller, logging, model, view};

use controller::SceneState;
use model::MeshData;
use view::render::{self, LightUniform, SceneResources, TransformUniform};
use view::texture::DiffuseTexture;
use view::GpuContext;

const WINDOW_TITLE: &str = "tabletop";
const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const TEXTURE_PATH: &str = "assets/table_texture.bmp";

struct App {
    // Core GPU resources
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    window: Arc<Window>,

    // Rendering state
    pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,
    scene_resources: SceneResources,
    texture: DiffuseTexture,
    mesh: model::mesh::MeshBuffers,

    // Scene state
    scene: SceneState,
    modifiers: ModifiersState,
}

impl App {
    async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let gpu = GpuContext::new(window.clone(), size.width, size.height).await?;
        let device = gpu.device.clone();
        let queue = gpu.queue.clone();
        let config = gpu.config.clone();

        let depth_format = wgpu::TextureFormat::Depth32Float;
        let (_depth_texture, depth_view) =
            render::create_depth_texture(&device, size.width, size.height);

        let texture = DiffuseTexture::load_bmp(&device, &queue, TEXTURE_PATH)?;
        let scene_resources = render::create_scene_resources(&device);
        let pipeline = render::create_table_pipeline(
            &device,
            gpu.format,
            &scene_resources.bind_group_layout,
            &texture.bind_group_layout,
            depth_format,
        );

        let mesh = MeshData::table().upload(&device);
        tracing::info!("uploaded table mesh: {} vertices", mesh.vertex_count);

        let scene = SceneState::new(size.width.max(1), size.height.max(1));

        Ok(Self {
            surface: gpu.surface,
            device,
            queue,
            config,
            size,
            window,
            pipeline,
            depth_view,
            scene_resources,
            texture,
            mesh,
            scene,
            modifiers: ModifiersState::empty(),
        })
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                true
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state, logical_key, ..
                    },
                ..
            } => {
                let redraw = match state {
                    ElementState::Pressed => {
                        if let Key::Character(text) = logical_key {
                            // Shifted characters ('Z') arrive as-is and match
                            // no command.
                            match text.chars().next() {
                                Some(ch) => self.scene.on_key_down(ch),
                                None => false,
                            }
                        } else {
                            false
                        }
                    }
                    ElementState::Released => self.scene.on_key_up(),
                };
                if redraw {
                    self.window.request_redraw();
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let orbit_held = self.modifiers.alt_key();
                if self
                    .scene
                    .on_mouse_move(position.x as f32, position.y as f32, orbit_held)
                {
                    self.window.request_redraw();
                }
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if self.scene.on_resize(new_size.width, new_size.height) {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            let (_depth_texture, depth_view) =
                render::create_depth_texture(&self.device, new_size.width, new_size.height);
            self.depth_view = depth_view;

            self.window.request_redraw();
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Matrices from current scene state; projection is re-selected every
        // frame from the held key.
        let projection = self.scene.projection_matrix();
        let view_matrix = self.scene.camera.view_matrix();
        let model_matrix = Mat4::IDENTITY;
        let transforms = TransformUniform {
            mvp: (projection * view_matrix * model_matrix).to_cols_array_2d(),
            model: model_matrix.to_cols_array_2d(),
            view: view_matrix.to_cols_array_2d(),
        };
        self.queue.write_buffer(
            &self.scene_resources.transform_buffer,
            0,
            bytemuck::bytes_of(&transforms),
        );

        let light = LightUniform {
            position: self.scene.light.position.to_array(),
            intensity: self.scene.light.intensity,
            color: self.scene.light.color.to_array(),
            _pad: 0.0,
        };
        self.queue.write_buffer(
            &self.scene_resources.light_buffer,
            0,
            bytemuck::bytes_of(&light),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.0,
                            g: 0.0,
                            b: 0.4,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.scene_resources.bind_group, &[]);
            render_pass.set_bind_group(1, &self.texture.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.mesh.position_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.mesh.uv_buffer.slice(..));
            render_pass.set_vertex_buffer(2, self.mesh.normal_buffer.slice(..));
            render_pass.draw(0..self.mesh.vertex_count, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn main() -> Result<()> {
    logging::init();

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title(WINDOW_TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
    let window = event_loop.create_window(window_attributes)?;
    let window = Arc::new(window);

    let mut app = pollster::block_on(App::new(window.clone()))?;

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);

        if let Event::WindowEvent {
            ref event,
            window_id,
        } = event
        {
            if window_id == app.window.id() && !app.input(event) {
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(physical_size) => {
                        app.resize(*physical_size);
                    }
                    WindowEvent::RedrawRequested => match app.render() {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => app.resize(app.size),
                        Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                        Err(e) => tracing::warn!("surface error: {:?}", e),
                    },
                    _ => {}
                }
            }
        }
    })?;

    Ok(())
}
