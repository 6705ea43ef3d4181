//! Error type of the facade crate.

use geosection_core::SectionError;
use geosection_render::RenderError;
use thiserror::Error;

/// Errors from building or exporting a section figure.
#[derive(Error, Debug)]
pub enum GeosectionError {
    /// Model access, slicing or lookup failed.
    #[error(transparent)]
    Section(#[from] SectionError),

    /// Drawing or exporting failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A specialized Result type for geosection operations.
pub type Result<T> = std::result::Result<T, GeosectionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use geosection_core::Direction;

    #[test]
    fn test_messages_pass_through() {
        let err: GeosectionError = SectionError::InvalidDirection("w".into()).into();
        assert_eq!(
            err.to_string(),
            SectionError::InvalidDirection("w".into()).to_string()
        );
        let err: GeosectionError = RenderError::UnsupportedFormat("gif".into()).into();
        assert!(err.to_string().contains("gif"));
        let err: GeosectionError = SectionError::CellOutOfRange {
            direction: Direction::Z,
            cell: 9,
            len: 3,
        }
        .into();
        assert!(matches!(err, GeosectionError::Section(_)));
    }
}
