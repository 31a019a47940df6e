pub mod camera;
pub mod colormap;
pub mod constants;
pub mod correlation;
pub mod error;
pub mod field;
pub mod geometry;
pub mod naming;
pub mod pipeline;
pub mod radial;
pub mod raymarch;
pub mod shader;
pub mod state;
pub mod uniforms;
pub mod wavefunction;

pub use camera::*;
pub use constants::*;
pub use correlation::*;
pub use error::OrbitalError;
pub use field::{sample, sample_grid, ScalarField};
pub use naming::*;
pub use pipeline::*;
pub use radial::*;
pub use shader::{volume_wgsl, LINES_WGSL};
pub use state::*;
pub use uniforms::*;
pub use wavefunction::*;
