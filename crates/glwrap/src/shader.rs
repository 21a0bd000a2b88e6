//! GLSL sources and shader objects.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use gl::types::{GLchar, GLint, GLsizei, GLuint};
use glwrap_core::enums::ShaderType;
use glwrap_core::{Object, ObjectKind};

use crate::error::GlwrapError;

/// File name reported for sources that were not loaded from a file.
pub const UNNAMED_SHADER: &str = "Unnamed shader";

/// GLSL source text plus the file it came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    source: String,
    file_name: String,
}

impl ShaderSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            file_name: UNNAMED_SHADER.to_owned(),
        }
    }

    /// Reads the source from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .with_context(|| format!("Shader file '{}' not found.", path.display()))?;
        Ok(Self {
            source,
            file_name: path.display().to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.file_name = file_name.into();
    }

    /// Replaces the value of `#define NAME` with `value`, e.g. to size an
    /// array before compiling.
    ///
    /// Everything after the macro name up to the end of its line is
    /// replaced. Fails with [`GlwrapError::MissingMacro`] if the source has no
    /// such define.
    pub fn insert_macro_value(&mut self, name: &str, value: impl fmt::Display) -> Result<()> {
        let name_end = find_define(&self.source, name).ok_or_else(|| {
            GlwrapError::MissingMacro {
                shader: self.file_name.clone(),
                name: name.to_owned(),
            }
        })?;

        let rest = &self.source[name_end..];
        let line_len = rest.find('\n').unwrap_or(rest.len());
        let line_len = rest[..line_len].strip_suffix('\r').map_or(line_len, str::len);
        let line_end = name_end + line_len;
        self.source = format!(
            "{} {value}{}",
            &self.source[..name_end],
            &self.source[line_end..]
        );
        Ok(())
    }
}

impl From<&str> for ShaderSource {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for ShaderSource {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

/// The byte offset just past `name` in the first `#define name` directive.
///
/// Spaces or tabs may separate `#define` from the name. `#define COUNT`
/// does not match `#define COUNT_MAX`.
fn find_define(source: &str, name: &str) -> Option<usize> {
    const DEFINE: &str = "#define";
    let is_blank = |c: char| c == ' ' || c == '\t';

    source.match_indices(DEFINE).find_map(|(start, _)| {
        let after = &source[start + DEFINE.len()..];
        let trimmed = after.trim_start_matches(is_blank);
        if trimmed.len() == after.len() {
            return None;
        }
        let tail = trimmed.strip_prefix(name)?;
        if !tail.chars().next().map_or(true, char::is_whitespace) {
            return None;
        }
        Some(source.len() - tail.len())
    })
}

/// Reads an info log of at most `length` bytes through `read`, which
/// receives the buffer size, a slot for the written length and the buffer.
pub(crate) fn read_info_log(
    length: GLint,
    read: impl FnOnce(GLsizei, &mut GLsizei, *mut GLchar),
) -> String {
    let capacity = length.max(1);
    let mut buffer = vec![0u8; capacity as usize];
    let mut written: GLsizei = 0;
    read(capacity, &mut written, buffer.as_mut_ptr().cast());
    buffer.truncate(written.clamp(0, capacity) as usize);
    String::from_utf8_lossy(&buffer).trim_end_matches('\0').to_owned()
}

pub enum ShaderKind {}

impl ObjectKind for ShaderKind {
    const NAME: &'static str = "shader";

    fn delete(name: GLuint) {
        crate::gl_call!(DeleteShader(name));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompileStatus {
    NotCompiled,
    Compiled,
    Failed,
}

#[derive(Debug)]
struct ShaderState {
    kind: ShaderType,
    status: Cell<CompileStatus>,
    file_name: RefCell<String>,
    // Bumped on every new source so programs can tell they are stale.
    revision: Cell<u64>,
}

impl ShaderState {
    fn new(kind: ShaderType) -> Self {
        Self {
            kind,
            status: Cell::new(CompileStatus::NotCompiled),
            file_name: RefCell::new(UNNAMED_SHADER.to_owned()),
            revision: Cell::new(0),
        }
    }

    fn source_replaced(&self) {
        self.status.set(CompileStatus::NotCompiled);
        self.revision.set(self.revision.get() + 1);
    }
}

/// A shader object of one stage. Clones share the object and its state.
#[derive(Clone)]
pub struct Shader {
    object: Object<ShaderKind>,
    state: Rc<ShaderState>,
}

impl Shader {
    #[track_caller]
    pub fn new(kind: ShaderType) -> Self {
        let name = crate::gl_call!(CreateShader(kind.into()));
        tracing::trace!(name, stage = kind.stage_name(), "created shader");
        Self {
            object: Object::adopt(name),
            state: Rc::new(ShaderState::new(kind)),
        }
    }

    /// Wraps a shader created elsewhere without taking ownership of it.
    pub fn from_raw(kind: ShaderType, name: GLuint) -> Self {
        Self {
            object: Object::from_raw(name),
            state: Rc::new(ShaderState::new(kind)),
        }
    }

    #[track_caller]
    pub fn with_source(kind: ShaderType, source: &ShaderSource) -> Self {
        let shader = Self::new(kind);
        shader.source(source);
        shader
    }

    #[track_caller]
    pub fn from_file(kind: ShaderType, path: impl AsRef<Path>) -> Result<Self> {
        let source = ShaderSource::from_file(path)?;
        Ok(Self::with_source(kind, &source))
    }

    /// Replaces the source. The shader has to be compiled again.
    #[track_caller]
    pub fn source(&self, source: &ShaderSource) {
        *self.state.file_name.borrow_mut() = source.file_name().to_owned();
        self.source_str(source.source());
    }

    /// Replaces the source, keeping the current file name.
    #[track_caller]
    pub fn source_str(&self, source: &str) {
        let text = source.as_ptr().cast::<GLchar>();
        let length = source.len() as GLint;
        crate::gl_call!(ShaderSource(self.name(), 1, &text, &length));
        self.state.source_replaced();
    }

    /// Compiles the shader. Does nothing if it is already compiled.
    ///
    /// Failure returns [`GlwrapError::ShaderCompile`] with the info log.
    #[track_caller]
    pub fn compile(&self) -> Result<()> {
        match self.state.status.get() {
            CompileStatus::Compiled => return Ok(()),
            CompileStatus::Failed => return Err(self.compile_error()),
            CompileStatus::NotCompiled => {}
        }

        crate::gl_call!(CompileShader(self.name()));
        let mut status: GLint = 0;
        crate::gl_call!(GetShaderiv(self.name(), gl::COMPILE_STATUS, &mut status));

        if status == GLint::from(gl::FALSE) {
            self.state.status.set(CompileStatus::Failed);
            let err = self.compile_error();
            tracing::warn!(shader = %self.file_name(), "{err}");
            return Err(err);
        }

        self.state.status.set(CompileStatus::Compiled);
        tracing::debug!(
            shader = %self.file_name(),
            stage = self.kind().stage_name(),
            "compiled shader"
        );
        Ok(())
    }

    pub fn is_compiled(&self) -> bool {
        self.state.status.get() == CompileStatus::Compiled
    }

    /// How many times the source has been replaced.
    pub fn revision(&self) -> u64 {
        self.state.revision.get()
    }

    /// The info log of the last compilation.
    #[track_caller]
    pub fn info_log(&self) -> String {
        let name = self.name();
        let mut length: GLint = 0;
        crate::gl_call!(GetShaderiv(name, gl::INFO_LOG_LENGTH, &mut length));
        read_info_log(length, |capacity, written, buffer| {
            crate::gl_call!(GetShaderInfoLog(name, capacity, written, buffer));
        })
    }

    pub fn file_name(&self) -> String {
        self.state.file_name.borrow().clone()
    }

    pub fn kind(&self) -> ShaderType {
        self.state.kind
    }

    pub fn name(&self) -> GLuint {
        self.object.name()
    }

    fn compile_error(&self) -> anyhow::Error {
        GlwrapError::ShaderCompile {
            shader: self.file_name(),
            log: self.info_log(),
        }
        .into()
    }
}

macro_rules! stage_constructors {
    ($($(#[$meta:meta])* $fn_name:ident => $kind:ident),* $(,)?) => {
        impl Shader {
            $(
                $(#[$meta])*
                #[track_caller]
                pub fn $fn_name(source: &ShaderSource) -> Self {
                    Self::with_source(ShaderType::$kind, source)
                }
            )*
        }
    };
}

stage_constructors! {
    vertex => Vertex,
    tess_control => TessControl,
    tess_evaluation => TessEvaluation,
    geometry => Geometry,
    fragment => Fragment,
    /// Requires GL 4.3.
    compute => Compute,
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("name", &self.name())
            .field("kind", &self.state.kind)
            .field("file_name", &*self.state.file_name.borrow())
            .field("status", &self.state.status.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_value_replaces_the_rest_of_the_line() {
        let mut source = ShaderSource::new("#version 330\n#define LIGHTS 4\nvoid main() {}\n");
        source.insert_macro_value("LIGHTS", 8).unwrap();
        assert_eq!(source.source(), "#version 330\n#define LIGHTS 8\nvoid main() {}\n");
    }

    #[test]
    fn macro_without_value_gets_one() {
        let mut source = ShaderSource::new("#define BLUR_RADIUS\nvoid main() {}");
        source.insert_macro_value("BLUR_RADIUS", 2.5).unwrap();
        assert_eq!(source.source(), "#define BLUR_RADIUS 2.5\nvoid main() {}");
    }

    #[test]
    fn macro_on_the_last_line_is_replaced() {
        let mut source = ShaderSource::new("#define N 1");
        source.insert_macro_value("N", "16").unwrap();
        assert_eq!(source.source(), "#define N 16");
    }

    #[test]
    fn longer_macro_names_are_not_matched() {
        let mut source = ShaderSource::new("#define COUNT_MAX 9\n#define COUNT 3\n");
        source.insert_macro_value("COUNT", 5).unwrap();
        assert_eq!(source.source(), "#define COUNT_MAX 9\n#define COUNT 5\n");
    }

    #[test]
    fn new_source_needs_a_new_compile() {
        let state = ShaderState::new(ShaderType::Fragment);
        state.status.set(CompileStatus::Compiled);
        state.source_replaced();
        assert_eq!(state.status.get(), CompileStatus::NotCompiled);
        assert_eq!(state.revision.get(), 1);
        state.source_replaced();
        assert_eq!(state.revision.get(), 2);
    }

    #[test]
    fn tab_separated_defines_are_matched() {
        let mut source = ShaderSource::new("#define\tN 1\nvoid main() {}\n");
        source.insert_macro_value("N", 16).unwrap();
        assert_eq!(source.source(), "#define\tN 16\nvoid main() {}\n");
    }

    #[test]
    fn crlf_line_endings_survive() {
        let mut source = ShaderSource::new("#define N 1\r\nvoid main() {}\r\n");
        source.insert_macro_value("N", 16).unwrap();
        assert_eq!(source.source(), "#define N 16\r\nvoid main() {}\r\n");
    }

    #[test]
    fn missing_macro_names_the_shader() {
        let mut source = ShaderSource::new("void main() {}");
        source.set_file_name("sky.frag");
        let err = source.insert_macro_value("SAMPLES", 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ShaderSource::insert_macro_value is called for 'sky.frag', \
             but the shader doesn't have any macro named SAMPLES"
        );
        assert_eq!(source.source(), "void main() {}");
    }

    #[test]
    fn sources_without_a_file_are_unnamed() {
        assert_eq!(ShaderSource::from("void main() {}").file_name(), "Unnamed shader");
    }

    #[test]
    fn missing_file_is_reported_by_name() {
        let err = ShaderSource::from_file("no/such/shader.vert").unwrap_err();
        assert_eq!(err.to_string(), "Shader file 'no/such/shader.vert' not found.");
    }

    #[test]
    fn info_log_is_cut_to_the_written_length() {
        let log = read_info_log(32, |capacity, written, buffer| {
            assert_eq!(capacity, 32);
            let text = b"0:1(1): error: syntax error\0";
            unsafe { std::ptr::copy_nonoverlapping(text.as_ptr().cast(), buffer, text.len()) };
            *written = (text.len() - 1) as GLsizei;
        });
        assert_eq!(log, "0:1(1): error: syntax error");
    }

    #[test]
    fn empty_info_log_is_empty() {
        let log = read_info_log(0, |_, written, _| *written = 0);
        assert!(log.is_empty());
    }
}
