//! Framebuffer objects.

use std::fmt;
use std::marker::PhantomData;

use anyhow::{anyhow, Result};
use gl::types::{GLenum, GLint, GLsizei, GLuint};
use glwrap_core::enums::{BindingPoint, CubeFace, FramebufferAttachment, FramebufferStatus, FramebufferType};
use glwrap_core::{Generate, Object, ObjectKind};

use crate::bind::{self, Bindable};
use crate::capabilities::require_loaded;
use crate::error::GlwrapError;
use crate::renderbuffer::Renderbuffer;
use crate::texture::{self, Texture, TextureTarget, Upload2D, Upload3D};

pub enum FramebufferKind {}

impl ObjectKind for FramebufferKind {
    const NAME: &'static str = "framebuffer";

    fn delete(name: GLuint) {
        crate::gl_call!(DeleteFramebuffers(1, &name));
    }
}

impl Generate for FramebufferKind {
    fn generate() -> GLuint {
        let mut name = 0;
        crate::gl_call!(GenFramebuffers(1, &mut name));
        name
    }
}

pub trait FramebufferTarget: 'static {
    const TYPE: FramebufferType;
}

/// Marker types for the framebuffer targets.
pub mod target {
    use super::FramebufferTarget;
    use glwrap_core::enums::FramebufferType;

    /// `GL_FRAMEBUFFER`: both draw and read.
    #[derive(Debug)]
    pub enum Both {}
    #[derive(Debug)]
    pub enum Draw {}
    #[derive(Debug)]
    pub enum Read {}

    impl FramebufferTarget for Both {
        const TYPE: FramebufferType = FramebufferType::Framebuffer;
    }
    impl FramebufferTarget for Draw {
        const TYPE: FramebufferType = FramebufferType::Draw;
    }
    impl FramebufferTarget for Read {
        const TYPE: FramebufferType = FramebufferType::Read;
    }
}

pub struct FramebufferObject<T: FramebufferTarget> {
    object: Object<FramebufferKind>,
    _target: PhantomData<T>,
}

pub type Framebuffer = FramebufferObject<target::Both>;
pub type DrawFramebuffer = FramebufferObject<target::Draw>;
pub type ReadFramebuffer = FramebufferObject<target::Read>;

impl<T: FramebufferTarget> FramebufferObject<T> {
    pub fn new() -> Self {
        Self::from_object(Object::new())
    }

    pub fn from_raw(name: GLuint) -> Self {
        Self::from_object(Object::from_raw(name))
    }

    /// The window-system provided framebuffer, name `0`.
    pub fn default_framebuffer() -> Self {
        Self::from_raw(0)
    }

    fn from_object(object: Object<FramebufferKind>) -> Self {
        Self {
            object,
            _target: PhantomData,
        }
    }

    pub fn name(&self) -> GLuint {
        self.object.name()
    }

    #[track_caller]
    pub fn bind(&self) {
        crate::gl_call!(BindFramebuffer(T::TYPE.into(), self.name()));
    }

    /// Binds the default framebuffer to this target.
    #[track_caller]
    pub fn unbind(&self) {
        crate::gl_call!(BindFramebuffer(T::TYPE.into(), 0));
    }

    pub fn is_bound(&self) -> bool {
        bind::current_binding(T::TYPE.binding()) == self.name()
    }

    pub fn currently_bound() -> Self {
        Self::from_raw(bind::current_binding(T::TYPE.binding()))
    }

    /// The completeness status, or `None` if the query itself failed.
    #[track_caller]
    pub fn status(&self) -> Option<FramebufferStatus> {
        bind::ensure_bound(self);
        let status = crate::gl_call!(CheckFramebufferStatus(T::TYPE.into()));
        FramebufferStatus::from_raw(status)
    }

    /// Fails with [`GlwrapError::IncompleteFramebuffer`] unless complete.
    #[track_caller]
    pub fn validate(&self) -> Result<()> {
        match self.status() {
            Some(FramebufferStatus::Complete) => Ok(()),
            Some(status) => Err(GlwrapError::IncompleteFramebuffer(status).into()),
            None => Err(anyhow!(
                "glCheckFramebufferStatus failed for framebuffer {}",
                self.name()
            )),
        }
    }

    #[track_caller]
    pub fn attach_renderbuffer(&self, attachment: FramebufferAttachment, renderbuffer: &Renderbuffer) {
        bind::ensure_bound(self);
        crate::gl_call!(FramebufferRenderbuffer(
            T::TYPE.into(),
            attachment.into(),
            gl::RENDERBUFFER,
            renderbuffer.name()
        ));
    }

    /// Attaches mipmap `level` of a two-dimensional texture.
    #[track_caller]
    pub fn attach_texture_2d<U: Upload2D>(
        &self,
        attachment: FramebufferAttachment,
        texture: &Texture<U>,
        level: GLint,
    ) {
        self.texture_2d(attachment, U::TYPE.into(), texture.name(), level);
    }

    /// Attaches mipmap `level` of one face of a cube map.
    #[track_caller]
    pub fn attach_cube_face(
        &self,
        attachment: FramebufferAttachment,
        face: CubeFace,
        texture: &texture::TextureCube,
        level: GLint,
    ) {
        self.texture_2d(attachment, face.into(), texture.name(), level);
    }

    /// Attaches a whole texture, layered if it has layers (GL 3.2).
    #[track_caller]
    pub fn attach_texture<U: TextureTarget>(
        &self,
        attachment: FramebufferAttachment,
        texture: &Texture<U>,
        level: GLint,
    ) -> Result<()> {
        require_loaded("glFramebufferTexture", gl::FramebufferTexture::is_loaded())?;
        bind::ensure_bound(self);
        crate::gl_call!(FramebufferTexture(
            T::TYPE.into(),
            attachment.into(),
            texture.name(),
            level
        ));
        Ok(())
    }

    /// Attaches one layer of a 3D or array texture.
    #[track_caller]
    pub fn attach_texture_layer<U: Upload3D>(
        &self,
        attachment: FramebufferAttachment,
        texture: &Texture<U>,
        level: GLint,
        layer: GLint,
    ) {
        bind::ensure_bound(self);
        crate::gl_call!(FramebufferTextureLayer(
            T::TYPE.into(),
            attachment.into(),
            texture.name(),
            level,
            layer
        ));
    }

    /// Selects the color attachments fragment outputs are written to.
    #[track_caller]
    pub fn draw_buffers(&self, attachments: &[FramebufferAttachment]) {
        bind::ensure_bound(self);
        let buffers: Vec<GLenum> = attachments.iter().copied().map(GLenum::from).collect();
        crate::gl_call!(DrawBuffers(buffers.len() as GLsizei, buffers.as_ptr()));
    }

    /// Selects the color attachment reads come from.
    #[track_caller]
    pub fn read_buffer(&self, attachment: FramebufferAttachment) {
        bind::ensure_bound(self);
        crate::gl_call!(ReadBuffer(attachment.into()));
    }

    #[track_caller]
    fn texture_2d(&self, attachment: FramebufferAttachment, textarget: GLenum, texture: GLuint, level: GLint) {
        bind::ensure_bound(self);
        crate::gl_call!(FramebufferTexture2D(
            T::TYPE.into(),
            attachment.into(),
            textarget,
            texture,
            level
        ));
    }
}

impl<T: FramebufferTarget> Default for FramebufferObject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FramebufferTarget> Clone for FramebufferObject<T> {
    fn clone(&self) -> Self {
        Self::from_object(self.object.clone())
    }
}

impl<T: FramebufferTarget> fmt::Debug for FramebufferObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramebufferObject")
            .field("target", &T::TYPE)
            .field("object", &self.object)
            .finish()
    }
}

impl<T: FramebufferTarget> Bindable for FramebufferObject<T> {
    fn binding_point(&self) -> BindingPoint {
        T::TYPE.binding()
    }

    fn raw_name(&self) -> GLuint {
        self.name()
    }

    fn bind(&self) {
        FramebufferObject::bind(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_use_their_targets() {
        assert_eq!(GLenum::from(<target::Both as FramebufferTarget>::TYPE), gl::FRAMEBUFFER);
        assert_eq!(GLenum::from(<target::Draw as FramebufferTarget>::TYPE), gl::DRAW_FRAMEBUFFER);
        assert_eq!(
            ReadFramebuffer::default_framebuffer().binding_point().query,
            gl::READ_FRAMEBUFFER_BINDING
        );
    }

    #[test]
    fn incomplete_status_explains_itself() {
        let err = GlwrapError::IncompleteFramebuffer(FramebufferStatus::IncompleteMissingAttachment);
        assert_eq!(
            err.to_string(),
            "Framebuffer error: \nThe framebuffer does not have at least one image attached to it."
        );
    }
}
