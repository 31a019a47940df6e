//! GPU passes shared by the native and web frontends.

mod helpers;
mod lines;
mod volume;

pub use lines::{LineBatch, LinePipeline, Topology};
pub use volume::VolumeRenderer;
