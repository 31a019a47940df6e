//! GPU-facing uniform and vertex layouts, kept in sync with the WGSL structs.

use crate::camera::Camera;
use crate::state::RenderParams;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// `struct Volume` in `volume.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct VolumeUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub inv_model: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub exposure: f32,
    pub threshold: f32,
    pub slice: f32,
    pub time: f32,
    pub theme: u32,
    pub charge_flash: u32,
    pub steps: u32,
    pub _pad: u32,
}

impl VolumeUniforms {
    pub fn new(camera: &Camera, model: Mat4, params: &RenderParams, time: f32) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            inv_model: model.inverse().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            exposure: params.exposure,
            threshold: params.threshold,
            slice: params.slice,
            time,
            theme: params.theme.index(),
            charge_flash: params.charge_flash as u32,
            steps: params.steps.max(1),
            _pad: 0,
        }
    }
}

/// `struct Lines` in `lines.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LineUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
}

impl LineUniforms {
    pub fn new(view_proj: Mat4, model: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        }
    }

    /// Identity transforms, for vertices already in clip space.
    pub fn screen() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<VolumeUniforms>(), 240);
        assert_eq!(std::mem::size_of::<VolumeUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<LineUniforms>(), 128);
        assert_eq!(std::mem::size_of::<LineVertex>(), 28);
    }
}
