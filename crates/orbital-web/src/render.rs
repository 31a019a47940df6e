use crate::constants::CLEAR_COLOR;
use glam::{Mat4, Vec3};
use orbital_core::geometry::wireframe_sphere_lines;
use orbital_core::{
    Camera, LineUniforms, OrbitalError, RenderParams, ScalarField, CURSOR_SPHERE_COLOR,
    CURSOR_SPHERE_RADIUS, CURSOR_SPHERE_SEGMENTS,
};
use orbital_render::{LineBatch, LinePipeline, Topology, VolumeRenderer};
use web_sys as web;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pub volume: VolumeRenderer,
    lines: LinePipeline,
    sphere: LineBatch,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, params: RenderParams) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
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

        Ok(Self {
            surface,
            device,
            queue,
            config,
            volume,
            lines,
            sphere,
            width,
            height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Configure the surface again after it was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn upload(&mut self, field: &ScalarField) -> Result<(), OrbitalError> {
        self.volume.upload(&self.device, &self.queue, field)
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        time: f32,
        sphere_scale: Option<f32>,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.volume.prepare(&self.queue, camera, time);
        if let Some(scale) = sphere_scale {
            let model = Mat4::from_scale(Vec3::splat(scale));
            self.sphere
                .set_uniforms(&self.queue, &LineUniforms::new(camera.view_proj(), model));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
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
            if sphere_scale.is_some() {
                self.lines.draw(&mut rpass, &self.sphere);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
