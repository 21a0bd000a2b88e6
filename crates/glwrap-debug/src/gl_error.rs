//! The error categories `glGetError` can report.

use std::fmt;

use gl::types::GLenum;
use glwrap_core::enums::ErrorType;

/// A non-zero `glGetError` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlError {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    InvalidFramebufferOperation,
    TableTooLarge,
    /// A value outside the documented set, kept so it can still be printed.
    Unknown(GLenum),
}

impl GlError {
    /// The categories the knowledge base keeps explanations for.
    pub const CATEGORIES: [GlError; 8] = [
        GlError::InvalidEnum,
        GlError::InvalidValue,
        GlError::InvalidOperation,
        GlError::StackOverflow,
        GlError::StackUnderflow,
        GlError::OutOfMemory,
        GlError::InvalidFramebufferOperation,
        GlError::TableTooLarge,
    ];

    /// Classifies a raw `glGetError` value. `GL_NO_ERROR` maps to `None`.
    pub fn from_raw(raw: GLenum) -> Option<GlError> {
        let error = match ErrorType::from_raw(raw) {
            Some(ErrorType::NoError) => return None,
            Some(ErrorType::InvalidEnum) => GlError::InvalidEnum,
            Some(ErrorType::InvalidValue) => GlError::InvalidValue,
            Some(ErrorType::InvalidOperation) => GlError::InvalidOperation,
            Some(ErrorType::StackOverflow) => GlError::StackOverflow,
            Some(ErrorType::StackUnderflow) => GlError::StackUnderflow,
            Some(ErrorType::OutOfMemory) => GlError::OutOfMemory,
            Some(ErrorType::InvalidFramebufferOperation) => GlError::InvalidFramebufferOperation,
            Some(ErrorType::TableTooLarge) => GlError::TableTooLarge,
            None => GlError::Unknown(raw),
        };
        Some(error)
    }

    /// Looks up a category by its GL macro name, e.g. `GL_INVALID_ENUM`.
    pub fn from_macro_name(name: &str) -> Option<GlError> {
        Self::CATEGORIES
            .into_iter()
            .find(|category| category.macro_name() == Some(name))
    }

    pub fn raw(self) -> GLenum {
        match self {
            GlError::InvalidEnum => ErrorType::InvalidEnum.into(),
            GlError::InvalidValue => ErrorType::InvalidValue.into(),
            GlError::InvalidOperation => ErrorType::InvalidOperation.into(),
            GlError::StackOverflow => ErrorType::StackOverflow.into(),
            GlError::StackUnderflow => ErrorType::StackUnderflow.into(),
            GlError::OutOfMemory => ErrorType::OutOfMemory.into(),
            GlError::InvalidFramebufferOperation => ErrorType::InvalidFramebufferOperation.into(),
            GlError::TableTooLarge => ErrorType::TableTooLarge.into(),
            GlError::Unknown(raw) => raw,
        }
    }

    /// The GL macro name, `None` for unknown values.
    pub fn macro_name(self) -> Option<&'static str> {
        let name = match self {
            GlError::InvalidEnum => "GL_INVALID_ENUM",
            GlError::InvalidValue => "GL_INVALID_VALUE",
            GlError::InvalidOperation => "GL_INVALID_OPERATION",
            GlError::StackOverflow => "GL_STACK_OVERFLOW",
            GlError::StackUnderflow => "GL_STACK_UNDERFLOW",
            GlError::OutOfMemory => "GL_OUT_OF_MEMORY",
            GlError::InvalidFramebufferOperation => "GL_INVALID_FRAMEBUFFER_OPERATION",
            GlError::TableTooLarge => "GL_TABLE_TOO_LARGE",
            GlError::Unknown(_) => return None,
        };
        Some(name)
    }

    /// Position in [`GlError::CATEGORIES`].
    pub(crate) fn index(self) -> Option<usize> {
        Self::CATEGORIES.iter().position(|category| *category == self)
    }
}

/// Prints the human title used in report headers, e.g. "Invalid Enum".
impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlError::InvalidEnum => f.write_str("Invalid Enum"),
            GlError::InvalidValue => f.write_str("Invalid Value"),
            GlError::InvalidOperation => f.write_str("Invalid Operation"),
            GlError::StackOverflow => f.write_str("Stack Overflow"),
            GlError::StackUnderflow => f.write_str("Stack Underflow"),
            GlError::OutOfMemory => f.write_str("Out of Memory"),
            GlError::InvalidFramebufferOperation => f.write_str("Invalid Framebuffer Operation"),
            GlError::TableTooLarge => f.write_str("Table Too Large"),
            GlError::Unknown(raw) => write!(f, "Unknown Error ({raw:#06x})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_error_is_not_an_error() {
        assert_eq!(GlError::from_raw(gl::NO_ERROR), None);
    }

    #[test]
    fn every_category_round_trips_through_its_raw_value() {
        for category in GlError::CATEGORIES {
            assert_eq!(GlError::from_raw(category.raw()), Some(category));
        }
    }

    #[test]
    fn titles_and_macro_names() {
        assert_eq!(GlError::InvalidEnum.to_string(), "Invalid Enum");
        assert_eq!(GlError::OutOfMemory.to_string(), "Out of Memory");
        assert_eq!(
            GlError::InvalidFramebufferOperation.macro_name(),
            Some("GL_INVALID_FRAMEBUFFER_OPERATION")
        );
        assert_eq!(GlError::from_raw(0x8031), Some(GlError::TableTooLarge));
    }

    #[test]
    fn unknown_values_keep_their_number() {
        let error = GlError::from_raw(0x1234);
        assert_eq!(error, Some(GlError::Unknown(0x1234)));
        assert_eq!(error.map(|e| e.to_string()).as_deref(), Some("Unknown Error (0x1234)"));
        assert_eq!(GlError::Unknown(0x1234).macro_name(), None);
    }

    #[test]
    fn macro_names_map_back() {
        assert_eq!(
            GlError::from_macro_name("GL_INVALID_VALUE"),
            Some(GlError::InvalidValue)
        );
        assert_eq!(GlError::from_macro_name("GL_NO_ERROR"), None);
    }
}
