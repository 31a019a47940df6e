use crate::helpers::{create_uniform_buffer, make_pipeline, uniform_entry, PipelineDesc};
use bytemuck::Zeroable;
use glam::Mat4;
use orbital_core::geometry::unit_cube_triangles;
use orbital_core::raymarch::steps_for_resolution;
use orbital_core::{
    Camera, CubeVertex, OrbitalError, RenderParams, RenderParamsPatch, ScalarField,
    VolumeUniforms,
};
use wgpu::util::DeviceExt;

/// The raymarch pass: owns the field texture and the live render parameters.
///
/// Each upload creates a fresh texture and bind group; the previous texture
/// is destroyed once the new one is bound, so a frame never sees a partially
/// written volume.
pub struct VolumeRenderer {
    pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    cube_vb: wgpu::Buffer,
    cube_vertex_count: u32,
    texture: Option<wgpu::Texture>,
    bind_group: Option<wgpu::BindGroup>,
    params: RenderParams,
    model: Mat4,
    max_dimension: u32,
}

impl VolumeRenderer {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        params: RenderParams,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("volume_shader"),
            source: wgpu::ShaderSource::Wgsl(orbital_core::volume_wgsl().into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("volume_bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D3,
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    },
                    count: None,
                },
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("volume_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                shader_location: 0,
                offset: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        };
        // Back faces only, blended front-to-back result, no depth writes.
        let pipeline = make_pipeline(
            device,
            &PipelineDesc {
                label: "volume_pipeline",
                layout: &layout,
                shader: &shader,
                buffers: &[vertex_layout],
                color_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Front),
            },
        );

        let cube = unit_cube_triangles();
        let cube_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("volume_cube"),
            contents: bytemuck::cast_slice(&cube),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform_buffer =
            create_uniform_buffer(device, "volume_uniforms", &VolumeUniforms::zeroed());

        Self {
            pipeline,
            bgl,
            uniform_buffer,
            cube_vb,
            cube_vertex_count: cube.len() as u32,
            texture: None,
            bind_group: None,
            params,
            model: Mat4::IDENTITY,
            max_dimension: device.limits().max_texture_dimension_3d,
        }
    }

    /// Replace the volume with `field`.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        field: &ScalarField,
    ) -> Result<(), OrbitalError> {
        let r = field.resolution();
        if r == 0 || r > self.max_dimension {
            return Err(OrbitalError::VolumeTooLarge {
                resolution: r,
                max: self.max_dimension,
            });
        }
        let size = wgpu::Extent3d {
            width: r,
            height: r,
            depth_or_array_layers: r,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("field_volume"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D3,
            format: wgpu::TextureFormat::R32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(field.data()),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * r),
                rows_per_image: Some(r),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("volume_bg"),
            layout: &self.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
            ],
        });

        self.bind_group = Some(bind_group);
        if let Some(old) = self.texture.replace(texture) {
            old.destroy();
        }
        self.params.steps = steps_for_resolution(r);
        log::info!(
            "uploaded {}³ volume ({} KiB), bound={:.2}",
            r,
            field.data().len() * 4 / 1024,
            field.bound_scale()
        );
        Ok(())
    }

    pub fn set_params(&mut self, patch: RenderParamsPatch) {
        self.params.apply(patch);
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    pub fn has_volume(&self) -> bool {
        self.bind_group.is_some()
    }

    /// Write this frame's uniforms. Call before the render pass begins.
    pub fn prepare(&self, queue: &wgpu::Queue, camera: &Camera, time: f32) {
        let u = VolumeUniforms::new(camera, self.model, &self.params, time);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        let Some(bind_group) = &self.bind_group else {
            return;
        };
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, self.cube_vb.slice(..));
        rpass.draw(0..self.cube_vertex_count, 0..1);
    }
}
