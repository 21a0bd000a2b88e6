//! Vertex array objects and vertex attribute setup.

use std::fmt;

use anyhow::Result;
use gl::types::{GLboolean, GLint, GLsizei, GLuint};
use glwrap_core::enums::{BindingPoint, BufferType, DataType, VERTEX_ARRAY_BINDING};
use glwrap_core::{Generate, Object, ObjectKind};
use glwrap_debug::output::ErrorMessage;

use crate::bind::{self, Bindable};
use crate::capabilities::require_loaded;
use crate::program::{Program, INVALID_LOCATION};

pub enum VertexArrayKind {}

impl ObjectKind for VertexArrayKind {
    const NAME: &'static str = "vertex array";

    fn delete(name: GLuint) {
        crate::gl_call!(DeleteVertexArrays(1, &name));
    }
}

impl Generate for VertexArrayKind {
    fn generate() -> GLuint {
        let mut name = 0;
        crate::gl_call!(GenVertexArrays(1, &mut name));
        name
    }
}

/// A vertex array object. Records attribute setup and the index buffer
/// binding made while it is bound.
#[derive(Clone, PartialEq, Eq)]
pub struct VertexArray {
    object: Object<VertexArrayKind>,
}

impl VertexArray {
    pub fn new() -> Self {
        Self {
            object: Object::new(),
        }
    }

    pub fn from_raw(name: GLuint) -> Self {
        Self {
            object: Object::from_raw(name),
        }
    }

    pub fn name(&self) -> GLuint {
        self.object.name()
    }

    #[track_caller]
    pub fn bind(&self) {
        crate::gl_call!(BindVertexArray(self.name()));
    }

    #[track_caller]
    pub fn unbind(&self) {
        crate::gl_call!(BindVertexArray(0));
    }

    pub fn is_bound(&self) -> bool {
        bind::current_binding(VERTEX_ARRAY_BINDING) == self.name()
    }

    pub fn currently_bound() -> Self {
        Self::from_raw(bind::current_binding(VERTEX_ARRAY_BINDING))
    }
}

impl Default for VertexArray {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexArray").field(&self.object).finish()
    }
}

impl Bindable for VertexArray {
    fn binding_point(&self) -> BindingPoint {
        VERTEX_ARRAY_BINDING
    }

    fn raw_name(&self) -> GLuint {
        self.name()
    }

    fn bind(&self) {
        VertexArray::bind(self);
    }
}

/// How `setup` feeds an attribute of a given data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttribFormat {
    /// `glVertexAttribPointer`, converted to float.
    Float,
    /// `glVertexAttribIPointer`, kept integral.
    Integer,
    /// `glVertexAttribLPointer`, kept double.
    Double,
}

impl AttribFormat {
    pub fn of(data_type: DataType) -> AttribFormat {
        match data_type {
            DataType::Float
            | DataType::HalfFloat
            | DataType::Fixed
            | DataType::Int2_10_10_10Rev
            | DataType::UnsignedInt2_10_10_10Rev
            | DataType::UnsignedInt10F11F11FRev => AttribFormat::Float,
            DataType::Double => AttribFormat::Double,
            _ => AttribFormat::Integer,
        }
    }
}

/// A vertex attribute slot of the bound vertex array.
///
/// Every call acts on the vertex array bound at the time; the pointer calls
/// also capture the bound `GL_ARRAY_BUFFER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttrib {
    location: Option<GLuint>,
}

impl VertexAttrib {
    /// The attribute at `layout(location = N)`.
    pub fn new(location: GLuint) -> Self {
        Self {
            location: Some(location),
        }
    }

    /// Looks up the attribute `name` of a linked program.
    ///
    /// A missing attribute is reported; setup calls on it do nothing.
    #[track_caller]
    pub fn from_program(program: &Program, name: &str) -> Self {
        let location = program.attrib_location(name);
        if location == INVALID_LOCATION {
            glwrap_debug::report(
                missing_attribute_message(name).at(std::panic::Location::caller()),
            );
            return Self { location: None };
        }
        Self::new(location as GLuint)
    }

    pub fn location(&self) -> Option<GLuint> {
        self.location
    }

    /// Picks the pointer call matching `data_type`: floating point types go
    /// through `pointer`, doubles through `lpointer`, everything else through
    /// `ipointer`.
    #[track_caller]
    pub fn setup(
        &self,
        values_per_vertex: GLint,
        data_type: DataType,
        stride: usize,
        offset: usize,
    ) -> Result<&Self> {
        match AttribFormat::of(data_type) {
            AttribFormat::Float => Ok(self.pointer(values_per_vertex, data_type, false, stride, offset)),
            AttribFormat::Integer => Ok(self.ipointer(values_per_vertex, data_type, stride, offset)),
            AttribFormat::Double => self.lpointer(values_per_vertex, stride, offset),
        }
    }

    /// `glVertexAttribPointer`: `offset` is a byte offset into the bound
    /// array buffer.
    #[track_caller]
    pub fn pointer(
        &self,
        values_per_vertex: GLint,
        data_type: DataType,
        normalized: bool,
        stride: usize,
        offset: usize,
    ) -> &Self {
        if let Some(location) = self.location {
            check_pointer_bindings();
            crate::gl_call!(VertexAttribPointer(
                location,
                values_per_vertex,
                data_type.into(),
                normalized as GLboolean,
                stride as GLsizei,
                offset as *const _
            ));
        }
        self
    }

    #[track_caller]
    pub fn ipointer(
        &self,
        values_per_vertex: GLint,
        data_type: DataType,
        stride: usize,
        offset: usize,
    ) -> &Self {
        if let Some(location) = self.location {
            check_pointer_bindings();
            crate::gl_call!(VertexAttribIPointer(
                location,
                values_per_vertex,
                data_type.into(),
                stride as GLsizei,
                offset as *const _
            ));
        }
        self
    }

    /// `glVertexAttribLPointer` (GL 4.1).
    #[track_caller]
    pub fn lpointer(&self, values_per_vertex: GLint, stride: usize, offset: usize) -> Result<&Self> {
        require_loaded("glVertexAttribLPointer", gl::VertexAttribLPointer::is_loaded())?;
        if let Some(location) = self.location {
            check_pointer_bindings();
            crate::gl_call!(VertexAttribLPointer(
                location,
                values_per_vertex,
                gl::DOUBLE,
                stride as GLsizei,
                offset as *const _
            ));
        }
        Ok(self)
    }

    #[track_caller]
    pub fn enable(&self) -> &Self {
        if let Some(location) = self.location {
            bind::check_for_default_binding(VERTEX_ARRAY_BINDING);
            crate::gl_call!(EnableVertexAttribArray(location));
        }
        self
    }

    #[track_caller]
    pub fn disable(&self) -> &Self {
        if let Some(location) = self.location {
            bind::check_for_default_binding(VERTEX_ARRAY_BINDING);
            crate::gl_call!(DisableVertexAttribArray(location));
        }
        self
    }

    /// Advances the attribute once per `divisor` instances instead of once
    /// per vertex.
    #[track_caller]
    pub fn divisor(&self, divisor: GLuint) -> &Self {
        if let Some(location) = self.location {
            bind::check_for_default_binding(VERTEX_ARRAY_BINDING);
            crate::gl_call!(VertexAttribDivisor(location, divisor));
        }
        self
    }
}

#[track_caller]
fn check_pointer_bindings() {
    bind::check_for_default_binding(VERTEX_ARRAY_BINDING);
    bind::check_for_default_binding(BufferType::Array.binding());
}

fn missing_attribute_message(name: &str) -> ErrorMessage {
    ErrorMessage::new(
        "Error getting attribute location",
        format!("Unable to get location of attribute '{name}'"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_types_pick_their_pointer_call() {
        assert_eq!(AttribFormat::of(DataType::Float), AttribFormat::Float);
        assert_eq!(AttribFormat::of(DataType::HalfFloat), AttribFormat::Float);
        assert_eq!(AttribFormat::of(DataType::Double), AttribFormat::Double);
        assert_eq!(AttribFormat::of(DataType::UnsignedByte), AttribFormat::Integer);
        assert_eq!(AttribFormat::of(DataType::Int), AttribFormat::Integer);
    }

    #[test]
    fn missing_attributes_are_inert() {
        let attrib = VertexAttrib { location: None };
        // No GL call is made for an attribute without a location.
        assert_eq!(attrib.enable().divisor(1).location(), None);
        assert_eq!(
            missing_attribute_message("a_normal").message,
            "Unable to get location of attribute 'a_normal'"
        );
    }

    #[test]
    fn explicit_locations_are_kept() {
        assert_eq!(VertexAttrib::new(3).location(), Some(3));
    }
}
