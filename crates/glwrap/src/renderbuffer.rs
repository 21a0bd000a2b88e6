//! Renderbuffer objects.

use std::fmt;

use gl::types::{GLsizei, GLuint};
use glwrap_core::enums::{BindingPoint, PixelDataInternalFormat, RENDERBUFFER_BINDING};
use glwrap_core::{Generate, Object, ObjectKind};

use crate::bind::{self, Bindable};

pub enum RenderbufferKind {}

impl ObjectKind for RenderbufferKind {
    const NAME: &'static str = "renderbuffer";

    fn delete(name: GLuint) {
        crate::gl_call!(DeleteRenderbuffers(1, &name));
    }
}

impl Generate for RenderbufferKind {
    fn generate() -> GLuint {
        let mut name = 0;
        crate::gl_call!(GenRenderbuffers(1, &mut name));
        name
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Renderbuffer {
    object: Object<RenderbufferKind>,
}

impl Renderbuffer {
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
        crate::gl_call!(BindRenderbuffer(gl::RENDERBUFFER, self.name()));
    }

    #[track_caller]
    pub fn unbind(&self) {
        crate::gl_call!(BindRenderbuffer(gl::RENDERBUFFER, 0));
    }

    pub fn is_bound(&self) -> bool {
        bind::current_binding(RENDERBUFFER_BINDING) == self.name()
    }

    pub fn currently_bound() -> Self {
        Self::from_raw(bind::current_binding(RENDERBUFFER_BINDING))
    }

    #[track_caller]
    pub fn storage(&self, internal_format: PixelDataInternalFormat, width: u32, height: u32) {
        bind::ensure_bound(self);
        crate::gl_call!(RenderbufferStorage(
            gl::RENDERBUFFER,
            internal_format.into(),
            width as GLsizei,
            height as GLsizei
        ));
    }

    #[track_caller]
    pub fn storage_multisample(
        &self,
        samples: u32,
        internal_format: PixelDataInternalFormat,
        width: u32,
        height: u32,
    ) {
        bind::ensure_bound(self);
        crate::gl_call!(RenderbufferStorageMultisample(
            gl::RENDERBUFFER,
            samples as GLsizei,
            internal_format.into(),
            width as GLsizei,
            height as GLsizei
        ));
    }
}

impl Default for Renderbuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Renderbuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Renderbuffer").field(&self.object).finish()
    }
}

impl Bindable for Renderbuffer {
    fn binding_point(&self) -> BindingPoint {
        RENDERBUFFER_BINDING
    }

    fn raw_name(&self) -> GLuint {
        self.name()
    }

    fn bind(&self) {
        Renderbuffer::bind(self);
    }
}
