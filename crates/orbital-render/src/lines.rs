use crate::helpers::{create_uniform_buffer, make_pipeline, uniform_entry, PipelineDesc};
use orbital_core::{LineUniforms, LineVertex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Lines,
    Triangles,
}

/// Colored vertex batch with its own transform.
pub struct LineBatch {
    label: String,
    topology: Topology,
    vertex_buffer: wgpu::Buffer,
    capacity: u64,
    count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl LineBatch {
    /// Replace the vertices, growing the buffer when needed.
    pub fn set_vertices(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[LineVertex]) {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            let capacity = needed.next_power_of_two().max(256);
            self.vertex_buffer = vertex_buffer(device, &self.label, capacity);
            self.capacity = capacity;
        }
        if needed > 0 {
            queue.write_buffer(&self.vertex_buffer, 0, bytes);
        }
        self.count = vertices.len() as u32;
    }

    pub fn set_uniforms(&self, queue: &wgpu::Queue, uniforms: &LineUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn vertex_buffer(device: &wgpu::Device, label: &str, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Alpha-blended pipelines for the cursor sphere and the plot overlay.
pub struct LinePipeline {
    lines: wgpu::RenderPipeline,
    triangles: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
}

impl LinePipeline {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines_shader"),
            source: wgpu::ShaderSource::Wgsl(orbital_core::LINES_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lines_bgl"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lines_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let attributes = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        }];
        let build = |label: &str, topology: wgpu::PrimitiveTopology| {
            make_pipeline(
                device,
                &PipelineDesc {
                    label,
                    layout: &layout,
                    shader: &shader,
                    buffers: &buffers,
                    color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    topology,
                    cull_mode: None,
                },
            )
        };
        Self {
            lines: build("lines_pipeline", wgpu::PrimitiveTopology::LineList),
            triangles: build("triangles_pipeline", wgpu::PrimitiveTopology::TriangleList),
            bgl,
        }
    }

    pub fn create_batch(&self, device: &wgpu::Device, label: &str, topology: Topology) -> LineBatch {
        let uniform_buffer = create_uniform_buffer(device, label, &LineUniforms::screen());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        LineBatch {
            label: label.to_owned(),
            topology,
            vertex_buffer: vertex_buffer(device, label, 256),
            capacity: 256,
            count: 0,
            uniform_buffer,
            bind_group,
        }
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, batch: &LineBatch) {
        if batch.is_empty() {
            return;
        }
        let pipeline = match batch.topology {
            Topology::Lines => &self.lines,
            Topology::Triangles => &self.triangles,
        };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &batch.bind_group, &[]);
        rpass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
        rpass.draw(0..batch.count, 0..1);
    }
}
