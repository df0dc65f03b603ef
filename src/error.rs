use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid device pixel ratio: {0}")]
    InvalidPixelRatio(f64),

    #[error("log scale domain must be strictly positive: [{min}, {max}]")]
    InvalidLogDomain { min: f64, max: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("plot is not mounted")]
    NotMounted,

    #[error("invalid plot config: {0}")]
    Config(#[from] serde_json::Error),
}
