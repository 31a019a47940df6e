use crate::constants::CLEAR_COLOR;
use crate::overlay::OverlayMesh;
use glam::{Mat4, Vec3};
use orbital_core::geometry::wireframe_sphere_lines;
use orbital_core::{
    Camera, LineUniforms, OrbitalError, RenderParams, ScalarField, CURSOR_SPHERE_COLOR,
    CURSOR_SPHERE_RADIUS, CURSOR_SPHERE_SEGMENTS,
};
use orbital_render::{LineBatch, LinePipeline, Topology, VolumeRenderer};

/// Per-frame inputs besides the camera.
pub struct FrameInputs<'a> {
    pub time: f32,
    pub sphere_scale: Option<f32>,
    pub overlay: Option<&'a OverlayMesh>,
}

/// First sRGB format, else the first format offered; `None` when the
/// surface is incompatible with the adapter.
pub fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pub volume: VolumeRenderer,
    lines: LinePipeline,
    sphere: LineBatch,
    plot_triangles: LineBatch,
    plot_lines: LineBatch,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    pub async fn new(
        window: &'w winit::window::Window,
        params: RenderParams,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        log::info!("adapter: {:?}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = pick_surface_format(&surface_caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let volume = VolumeRenderer::new(&device, format, params);
        let lines = LinePipeline::new(&device, format);
        let mut sphere = lines.create_batch(&device, "cursor_sphere", Topology::Lines);
        sphere.set_vertices(
            &device,
            &queue,
            &wireframe_sphere_lines(CURSOR_SPHERE_RADIUS, CURSOR_SPHERE_SEGMENTS, CURSOR_SPHERE_COLOR),
        );
        let plot_triangles = lines.create_batch(&device, "plot_triangles", Topology::Triangles);
        let plot_lines = lines.create_batch(&device, "plot_lines", Topology::Lines);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            volume,
            lines,
            sphere,
            plot_triangles,
            plot_lines,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn upload(&mut self, field: &ScalarField) -> Result<(), OrbitalError> {
        self.volume.upload(&self.device, &self.queue, field)
    }

    pub fn render(&mut self, camera: &Camera, inputs: &FrameInputs<'_>) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.volume.prepare(&self.queue, camera, inputs.time);
        if let Some(scale) = inputs.sphere_scale {
            let model = Mat4::from_scale(Vec3::splat(scale));
            self.sphere
                .set_uniforms(&self.queue, &LineUniforms::new(camera.view_proj(), model));
        }
        if let Some(mesh) = inputs.overlay {
            self.plot_triangles
                .set_vertices(&self.device, &self.queue, &mesh.triangles);
            self.plot_lines
                .set_vertices(&self.device, &self.queue, &mesh.lines);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.volume.draw(&mut rpass);
            if inputs.sphere_scale.is_some() {
                self.lines.draw(&mut rpass, &self.sphere);
            }
            if inputs.overlay.is_some() {
                self.lines.draw(&mut rpass, &self.plot_triangles);
                self.lines.draw(&mut rpass, &self.plot_lines);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
