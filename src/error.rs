use thiserror::Error;

pub type VizResult<T> = Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid story `{id}`: {reason}")]
    InvalidStory { id: u32, reason: String },

    #[error("3D rendering context is unavailable")]
    RenderingUnavailable,

    #[error("render backend failure: {0}")]
    Backend(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
