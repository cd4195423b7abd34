//! error types shared by generation & streaming

/// Everything that can go wrong while materializing the world.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("invalid generation range [{min_x}, {max_x})")]
    InvalidRange { min_x: i32, max_x: i32 },
    #[error("scene rejected insertion: {reason}")]
    SceneRejected { reason: String },
}

pub type WorldResult<T> = Result<T, WorldError>;

/// Generation ranges are half‑open; `min_x == max_x` is empty but legal.
#[inline]
pub fn check_range(min_x: i32, max_x: i32) -> WorldResult<()> {
    if min_x > max_x {
        return Err(WorldError::InvalidRange { min_x, max_x });
    }
    Ok(())
}
