pub type SunwheelResult<T> = Result<T, SunwheelError>;

#[derive(thiserror::Error, Debug)]
pub enum SunwheelError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SunwheelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SunwheelError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(SunwheelError::layout("x").to_string().contains("layout error:"));
        assert!(
            SunwheelError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            SunwheelError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SunwheelError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
