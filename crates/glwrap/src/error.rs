//! Errors callers may want to branch on.
//!
//! Setup functions return `anyhow::Result`; the conditions below are raised
//! as `GlwrapError` so they can be recovered with `downcast_ref`.

use std::fmt;

use glwrap_core::enums::FramebufferStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlwrapError {
    /// The loaded context lacks an entry point or extension.
    Unsupported { feature: &'static str },
    /// `insert_macro_value` found no `#define NAME` in the source.
    MissingMacro { shader: String, name: String },
    ShaderCompile { shader: String, log: String },
    ProgramLink { shaders: Vec<String>, log: String },
    IncompleteFramebuffer(FramebufferStatus),
    /// A texture upload was handed fewer bytes than the driver would read.
    PixelDataTooShort { required: usize, provided: usize },
}

impl fmt::Display for GlwrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlwrapError::Unsupported { feature } => {
                write!(f, "{feature} is not supported by the current OpenGL context")
            }
            GlwrapError::MissingMacro { shader, name } => write!(
                f,
                "ShaderSource::insert_macro_value is called for '{shader}', but the shader doesn't have any macro named {name}"
            ),
            GlwrapError::ShaderCompile { shader, log } => {
                write!(f, "Compile failure in shader '{shader}' :\n{log}")
            }
            GlwrapError::ProgramLink { shaders, log } => {
                writeln!(f, "OpenGL failed to link the following shaders together: ")?;
                for shader in shaders {
                    writeln!(f, " - {shader}")?;
                }
                write!(f, "\nThe error message: \n{log}")
            }
            GlwrapError::IncompleteFramebuffer(status) => {
                write!(f, "Framebuffer error: \n{}", status.description())
            }
            GlwrapError::PixelDataTooShort { required, provided } => write!(
                f,
                "pixel data holds {provided} bytes but the upload reads {required}"
            ),
        }
    }
}

impl std::error::Error for GlwrapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_errors_list_every_shader() {
        let err = GlwrapError::ProgramLink {
            shaders: vec!["a.vert".into(), "b.frag".into()],
            log: "error: main not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "OpenGL failed to link the following shaders together: \n - a.vert\n - b.frag\n\n\
             The error message: \nerror: main not found"
        );
    }

    #[test]
    fn unsupported_survives_anyhow() {
        let err: anyhow::Error = GlwrapError::Unsupported { feature: "glBufferStorage" }.into();
        assert_eq!(
            err.downcast_ref::<GlwrapError>(),
            Some(&GlwrapError::Unsupported { feature: "glBufferStorage" })
        );
    }
}
