use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrbitalError {
    #[error("resample #{generation} failed: {reason}")]
    ResampleFailed { generation: u64, reason: String },
    #[error("resample worker disconnected")]
    WorkerDisconnected,
    #[error("volume of {resolution}³ exceeds the device limit of {max} per dimension")]
    VolumeTooLarge { resolution: u32, max: u32 },
}

impl OrbitalError {
    /// Generation the error belongs to, when it came from a resample.
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::ResampleFailed { generation, .. } => Some(*generation),
            _ => None,
        }
    }
}
