use super::gl_enum;

/// `GL_TABLE_TOO_LARGE` only exists in the imaging subset of the
/// compatibility profile, which the `gl` crate does not generate.
pub const TABLE_TOO_LARGE: gl::types::GLenum = 0x8031;

gl_enum! {
    /// Values returned by `glGetError`.
    pub enum ErrorType {
        NoError = gl::NO_ERROR,
        InvalidEnum = gl::INVALID_ENUM,
        InvalidValue = gl::INVALID_VALUE,
        InvalidOperation = gl::INVALID_OPERATION,
        StackOverflow = gl::STACK_OVERFLOW,
        StackUnderflow = gl::STACK_UNDERFLOW,
        OutOfMemory = gl::OUT_OF_MEMORY,
        InvalidFramebufferOperation = gl::INVALID_FRAMEBUFFER_OPERATION,
        TableTooLarge = TABLE_TOO_LARGE,
    }
}
