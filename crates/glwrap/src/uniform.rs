//! Typed uniform variables.

use std::fmt;
use std::marker::PhantomData;

use gl::types::GLint;
use glwrap_debug::output::ErrorMessage;
#[cfg(feature = "debug")]
use glwrap_debug::GlError;

use crate::bind;
use crate::program::{Program, INVALID_LOCATION};

/// A value that can be uploaded to a uniform of the current program.
pub trait UniformValue: Copy {
    fn upload(self, location: GLint);
}

impl UniformValue for f32 {
    fn upload(self, location: GLint) {
        crate::gl_call!(Uniform1f(location, self));
    }
}

impl UniformValue for i32 {
    fn upload(self, location: GLint) {
        crate::gl_call!(Uniform1i(location, self));
    }
}

impl UniformValue for u32 {
    fn upload(self, location: GLint) {
        crate::gl_call!(Uniform1ui(location, self));
    }
}

impl UniformValue for bool {
    fn upload(self, location: GLint) {
        crate::gl_call!(Uniform1i(location, GLint::from(self)));
    }
}

macro_rules! vector_uniforms {
    ($($ty:ty => $func:ident),* $(,)?) => {
        $(impl UniformValue for $ty {
            fn upload(self, location: GLint) {
                crate::gl_call!($func(location, 1, self.as_ptr()));
            }
        })*
    };
}

vector_uniforms! {
    [f32; 2] => Uniform2fv,
    [f32; 3] => Uniform3fv,
    [f32; 4] => Uniform4fv,
    [i32; 2] => Uniform2iv,
    [i32; 3] => Uniform3iv,
    [i32; 4] => Uniform4iv,
}

// Matrices are column-major: each inner array is one column.
impl UniformValue for [[f32; 3]; 3] {
    fn upload(self, location: GLint) {
        crate::gl_call!(UniformMatrix3fv(location, 1, gl::FALSE, self.as_ptr().cast()));
    }
}

impl UniformValue for [[f32; 4]; 4] {
    fn upload(self, location: GLint) {
        crate::gl_call!(UniformMatrix4fv(location, 1, gl::FALSE, self.as_ptr().cast()));
    }
}

/// A uniform of `program`, looked up once.
///
/// A name the linker did not keep (misspelled, or optimized out) is
/// reported when the uniform is created; setting it afterwards does nothing.
pub struct Uniform<T: UniformValue> {
    program: Program,
    name: String,
    location: GLint,
    _value: PhantomData<fn(T)>,
}

impl<T: UniformValue> Uniform<T> {
    #[track_caller]
    pub fn new(program: &Program, name: &str) -> Self {
        let location = program.uniform_location(name);
        if location == INVALID_LOCATION {
            let message = missing_location_message(name, &program.shader_names());
            glwrap_debug::report(message.at(std::panic::Location::caller()));
        }
        Self {
            program: program.clone(),
            name: name.to_owned(),
            location,
            _value: PhantomData,
        }
    }

    /// Uploads `value`. The program must be in use.
    ///
    /// A `T` that does not match the GLSL type is reported only with the
    /// `debug` feature, which is what polls `glGetError` after the upload.
    #[track_caller]
    pub fn set(&self, value: T) {
        if !self.is_active() {
            return;
        }
        bind::ensure_active_program(self.program.name());
        value.upload(self.location);

        #[cfg(feature = "debug")]
        if is_type_mismatch(glwrap_debug::last_error()) {
            let message = type_mismatch_message(&self.name, &self.program.shader_names());
            glwrap_debug::report(message.at(std::panic::Location::caller()));
        }
    }

    pub fn location(&self) -> GLint {
        self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the program has this uniform.
    pub fn is_active(&self) -> bool {
        self.location != INVALID_LOCATION
    }
}

impl<T: UniformValue> fmt::Debug for Uniform<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uniform")
            .field("program", &self.program.name())
            .field("name", &self.name)
            .field("location", &self.location)
            .finish()
    }
}

fn missing_location_message(name: &str, shader_names: &str) -> ErrorMessage {
    ErrorMessage::new(
        "Error getting uniform location",
        format!(
            "Error getting the location of uniform '{name}' in the program using the \
             following shaders:\n{shader_names}"
        ),
    )
}

// glUniform* raises GL_INVALID_OPERATION when the call does not match the
// declared uniform type.
#[cfg(feature = "debug")]
fn is_type_mismatch(error: Option<GlError>) -> bool {
    error == Some(GlError::InvalidOperation)
}

#[cfg(feature = "debug")]
fn type_mismatch_message(name: &str, shader_names: &str) -> ErrorMessage {
    ErrorMessage::new(
        "Error setting uniform value",
        format!(
            "Uniform::set is called for uniform '{name}' but the uniform template parameter \
             and the actual uniform type mismatches. \n\
             The error happened in the program using the following shaders:\n{shader_names}"
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_location_lists_the_shaders() {
        let message = missing_location_message("u_time", " - wave.vert\n - wave.frag\n");
        assert_eq!(message.title, "Error getting uniform location");
        assert_eq!(
            message.message,
            "Error getting the location of uniform 'u_time' in the program using the \
             following shaders:\n - wave.vert\n - wave.frag\n"
        );
    }

    #[cfg(feature = "debug")]
    #[test]
    fn only_invalid_operation_counts_as_a_type_mismatch() {
        assert!(is_type_mismatch(Some(GlError::InvalidOperation)));
        assert!(!is_type_mismatch(Some(GlError::InvalidValue)));
        assert!(!is_type_mismatch(None));
    }

    #[cfg(feature = "debug")]
    #[test]
    fn type_mismatch_names_the_uniform() {
        let message = type_mismatch_message("u_color", " - flat.frag\n");
        assert_eq!(message.title, "Error setting uniform value");
        assert!(message.message.starts_with("Uniform::set is called for uniform 'u_color'"));
        assert!(message.message.ends_with("following shaders:\n - flat.frag\n"));
    }
}
