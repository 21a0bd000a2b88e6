//! Program objects.

use std::cell::RefCell;
use std::ffi::CString;
use std::fmt;
use std::rc::Rc;

use anyhow::Result;
use gl::types::{GLchar, GLint, GLuint};
use glwrap_core::enums::{BindingPoint, TransformFeedbackBufferMode, CURRENT_PROGRAM};
use glwrap_core::{Object, ObjectKind};
use glwrap_debug::output::ErrorMessage;

use crate::bind::{self, Bindable};
use crate::error::GlwrapError;
use crate::shader::{read_info_log, Shader};
use crate::uniform::{Uniform, UniformValue};

/// Location returned for names the linker did not keep.
pub const INVALID_LOCATION: GLint = -1;

pub enum ProgramKind {}

impl ObjectKind for ProgramKind {
    const NAME: &'static str = "program";

    fn delete(name: GLuint) {
        crate::gl_call!(DeleteProgram(name));
    }
}

#[derive(Debug, Default)]
struct ProgramState {
    shaders: Vec<Shader>,
    linked: bool,
    // Shader revisions the last successful link was made from.
    linked_revisions: Vec<u64>,
}

impl ProgramState {
    fn revisions(&self) -> Vec<u64> {
        self.shaders.iter().map(Shader::revision).collect()
    }

    fn is_linked(&self) -> bool {
        self.linked && self.linked_revisions == self.revisions()
    }
}

/// A program object. Clones share the object and its attached shaders.
///
/// When the last handle is dropped the shaders are detached before the
/// program is deleted, so they can be released too.
#[derive(Clone)]
pub struct Program {
    object: Object<ProgramKind>,
    state: Rc<RefCell<ProgramState>>,
}

impl Program {
    #[track_caller]
    pub fn new() -> Self {
        let name = crate::gl_call!(CreateProgram());
        tracing::trace!(name, "created program");
        Self {
            object: Object::adopt(name),
            state: Rc::default(),
        }
    }

    pub fn name(&self) -> GLuint {
        self.object.name()
    }

    /// Compiles `shader` if needed and attaches it.
    #[track_caller]
    pub fn attach_shader(&self, shader: &Shader) -> Result<()> {
        shader.compile()?;
        crate::gl_call!(AttachShader(self.name(), shader.name()));
        let mut state = self.state.borrow_mut();
        state.shaders.push(shader.clone());
        state.linked = false;
        Ok(())
    }

    /// Attaches every shader in order, stopping at the first failure.
    #[track_caller]
    pub fn attach_shaders<'a>(&self, shaders: impl IntoIterator<Item = &'a Shader>) -> Result<()> {
        for shader in shaders {
            self.attach_shader(shader)?;
        }
        Ok(())
    }

    /// Links the attached shaders.
    ///
    /// Failure returns [`GlwrapError::ProgramLink`] naming every attached
    /// shader file together with the info log.
    #[track_caller]
    pub fn link(&self) -> Result<()> {
        crate::gl_call!(LinkProgram(self.name()));
        let mut status: GLint = 0;
        crate::gl_call!(GetProgramiv(self.name(), gl::LINK_STATUS, &mut status));

        let linked = status != GLint::from(gl::FALSE);
        {
            let mut state = self.state.borrow_mut();
            state.linked = linked;
            state.linked_revisions = state.revisions();
        }
        if !linked {
            let err = GlwrapError::ProgramLink {
                shaders: self.shader_files(),
                log: self.info_log(),
            };
            tracing::warn!(program = self.name(), "{err}");
            return Err(err.into());
        }

        tracing::debug!(program = self.name(), shaders = self.state.borrow().shaders.len(), "linked program");
        Ok(())
    }

    /// Whether the last link succeeded and no attached shader got a new
    /// source since.
    pub fn is_linked(&self) -> bool {
        self.state.borrow().is_linked()
    }

    /// Checks whether the program can run in the current GL state.
    ///
    /// A failure is reported through the debug output; rendering with the
    /// program may then raise `GL_INVALID_OPERATION`.
    #[track_caller]
    pub fn validate(&self) -> bool {
        crate::gl_call!(ValidateProgram(self.name()));
        let mut status: GLint = 0;
        crate::gl_call!(GetProgramiv(self.name(), gl::VALIDATE_STATUS, &mut status));
        if status != GLint::from(gl::FALSE) {
            return true;
        }

        let message = format!(
            "The validation of the program containing the following shaders failed:\n{}\n\
             This program might generate GL_INVALID_OPERATION when used for rendering \n\
             The validation info: {}",
            self.shader_names(),
            self.info_log()
        );
        glwrap_debug::report(
            ErrorMessage::new("Program validation failure", message)
                .at(std::panic::Location::caller()),
        );
        false
    }

    /// Makes this the current program, linking it first if needed.
    ///
    /// Shaders whose source changed since the last link are compiled again
    /// before relinking.
    #[track_caller]
    pub fn use_program(&self) -> Result<()> {
        if !self.is_linked() {
            let shaders = self.state.borrow().shaders.clone();
            for shader in &shaders {
                shader.compile()?;
            }
            self.link()?;
        }
        crate::gl_call!(UseProgram(self.name()));
        Ok(())
    }

    /// Stops using this program.
    #[track_caller]
    pub fn unuse(&self) {
        bind::ensure_active_program(self.name());
        crate::gl_call!(UseProgram(0));
    }

    pub fn is_active(&self) -> bool {
        bind::current_binding(CURRENT_PROGRAM) == self.name()
    }

    /// Location of a uniform, or [`INVALID_LOCATION`].
    #[track_caller]
    pub fn uniform_location(&self, name: &str) -> GLint {
        match CString::new(name) {
            Ok(name) => crate::gl_call!(GetUniformLocation(self.name(), name.as_ptr())),
            Err(_) => INVALID_LOCATION,
        }
    }

    /// Location of a vertex attribute, or [`INVALID_LOCATION`].
    #[track_caller]
    pub fn attrib_location(&self, name: &str) -> GLint {
        match CString::new(name) {
            Ok(name) => crate::gl_call!(GetAttribLocation(self.name(), name.as_ptr())),
            Err(_) => INVALID_LOCATION,
        }
    }

    /// A typed handle to the uniform `name`.
    #[track_caller]
    pub fn uniform<T: UniformValue>(&self, name: &str) -> Uniform<T> {
        Uniform::new(self, name)
    }

    /// Selects the outputs captured by transform feedback. Takes effect at
    /// the next link.
    #[track_caller]
    pub fn transform_feedback_varyings(
        &self,
        varyings: &[&str],
        mode: TransformFeedbackBufferMode,
    ) -> Result<()> {
        let names = varyings
            .iter()
            .map(|name| CString::new(*name))
            .collect::<Result<Vec<_>, _>>()?;
        let pointers: Vec<*const GLchar> = names.iter().map(|name| name.as_ptr()).collect();
        crate::gl_call!(TransformFeedbackVaryings(
            self.name(),
            pointers.len() as GLint,
            pointers.as_ptr(),
            mode.into()
        ));
        self.state.borrow_mut().linked = false;
        Ok(())
    }

    /// The info log of the last link or validation.
    #[track_caller]
    pub fn info_log(&self) -> String {
        let name = self.name();
        let mut length: GLint = 0;
        crate::gl_call!(GetProgramiv(name, gl::INFO_LOG_LENGTH, &mut length));
        read_info_log(length, |capacity, written, buffer| {
            crate::gl_call!(GetProgramInfoLog(name, capacity, written, buffer));
        })
    }

    /// The attached shader files, one `" - file\n"` line each.
    pub fn shader_names(&self) -> String {
        format_shader_names(&self.shader_files())
    }

    fn shader_files(&self) -> Vec<String> {
        self.state
            .borrow()
            .shaders
            .iter()
            .map(Shader::file_name)
            .collect()
    }
}

pub(crate) fn format_shader_names(files: &[String]) -> String {
    files.iter().map(|file| format!(" - {file}\n")).collect()
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        if !self.object.is_unique() || !self.object.is_owning() {
            return;
        }
        for shader in self.state.borrow_mut().shaders.drain(..) {
            crate::gl_call!(DetachShader(self.object.name(), shader.name()));
        }
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Program")
            .field("name", &self.name())
            .field("linked", &state.is_linked())
            .field("shaders", &state.shaders)
            .finish()
    }
}

impl Bindable for Program {
    fn binding_point(&self) -> BindingPoint {
        CURRENT_PROGRAM
    }

    fn raw_name(&self) -> GLuint {
        self.name()
    }

    fn bind(&self) {
        crate::gl_call!(UseProgram(self.name()));
    }
}

#[cfg(test)]
mod tests {
    use glwrap_core::enums::ShaderType;

    use super::*;

    #[test]
    fn a_failed_link_is_not_linked() {
        let state = ProgramState::default();
        assert!(!state.is_linked());
        let state = ProgramState {
            linked: true,
            ..ProgramState::default()
        };
        assert!(state.is_linked());
    }

    #[test]
    fn links_from_older_shader_sources_are_stale() {
        let shaders = vec![
            Shader::from_raw(ShaderType::Vertex, 3),
            Shader::from_raw(ShaderType::Fragment, 4),
        ];
        let current = ProgramState {
            shaders: shaders.clone(),
            linked: true,
            linked_revisions: vec![0, 0],
        };
        assert!(current.is_linked());

        // Recorded at link time for a different fragment shader source.
        let stale = ProgramState {
            shaders,
            linked: true,
            linked_revisions: vec![0, 1],
        };
        assert!(!stale.is_linked());
    }

    #[test]
    fn shader_names_are_listed_one_per_line() {
        let files = vec!["mesh.vert".to_owned(), "mesh.frag".to_owned()];
        assert_eq!(format_shader_names(&files), " - mesh.vert\n - mesh.frag\n");
        assert_eq!(format_shader_names(&[]), "");
    }
}
