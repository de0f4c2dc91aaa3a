use thiserror::Error;

/// Invalid settings supplied by a spline consumer.
///
/// Core curve math never fails; these are reported by `validate` methods
/// so callers can clamp to a safe value and log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("spacing must be positive, got {0}")]
    NonPositiveSpacing(f32),

    #[error("size must be positive, got {0}")]
    NonPositiveSize(f32),

    #[error("interval [{start}, {end}] is empty")]
    EmptyInterval { start: f32, end: f32 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
