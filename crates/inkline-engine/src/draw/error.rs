use thiserror::Error;

/// Rejected [`DrawConfig`](super::DrawConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("min_width ({min}) exceeds max_width ({max})")]
    WidthRange { min: f32, max: f32 },

    #[error("max_points must be at least 1")]
    ZeroPointCap,

    #[error("end_cap_name must not be empty")]
    EmptyEndCapName,
}
