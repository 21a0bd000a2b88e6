use gl::types::GLenum;

use super::{gl_enum, BindingPoint};

gl_enum! {
    pub enum FramebufferType {
        Framebuffer = gl::FRAMEBUFFER,
        Draw = gl::DRAW_FRAMEBUFFER,
        Read = gl::READ_FRAMEBUFFER,
    }
}

impl FramebufferType {
    pub fn binding(self) -> BindingPoint {
        match self {
            FramebufferType::Framebuffer => {
                BindingPoint::new(gl::FRAMEBUFFER_BINDING, "GL_FRAMEBUFFER_BINDING")
            }
            FramebufferType::Draw => {
                BindingPoint::new(gl::DRAW_FRAMEBUFFER_BINDING, "GL_DRAW_FRAMEBUFFER_BINDING")
            }
            FramebufferType::Read => {
                BindingPoint::new(gl::READ_FRAMEBUFFER_BINDING, "GL_READ_FRAMEBUFFER_BINDING")
            }
        }
    }
}

gl_enum! {
    /// Result of `glCheckFramebufferStatus`.
    pub enum FramebufferStatus {
        Complete = gl::FRAMEBUFFER_COMPLETE,
        Undefined = gl::FRAMEBUFFER_UNDEFINED,
        IncompleteAttachment = gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
        IncompleteMissingAttachment = gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT,
        IncompleteDrawBuffer = gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER,
        IncompleteReadBuffer = gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER,
        Unsupported = gl::FRAMEBUFFER_UNSUPPORTED,
        IncompleteMultisample = gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE,
        IncompleteLayerTargets = gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS,
    }
}

impl FramebufferStatus {
    /// Explains why a framebuffer is not complete.
    pub fn description(self) -> &'static str {
        match self {
            FramebufferStatus::Complete => "The framebuffer is complete.",
            FramebufferStatus::Undefined => "The currently bound framebuffer does not exist.",
            FramebufferStatus::IncompleteAttachment => {
                "One or more framebuffer attachment points are incomplete."
            }
            FramebufferStatus::IncompleteMissingAttachment => {
                "The framebuffer does not have at least one image attached to it."
            }
            FramebufferStatus::IncompleteDrawBuffer => {
                "The value of GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE is GL_NONE for any \
                 color attachment point(s) named by GL_DRAW_BUFFERi."
            }
            FramebufferStatus::IncompleteReadBuffer => {
                "The GL_READ_BUFFER is not GL_NONE and the value of \
                 GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE is GL_NONE for the color attachment \
                 point named by GL_READ_BUFFER."
            }
            FramebufferStatus::Unsupported => {
                "The combination of internal formats of the attached images violates an \
                 implementation-dependent set of restrictions."
            }
            FramebufferStatus::IncompleteMultisample => {
                "One of the followings happened: \n\
                 -  The value of GL_RENDERBUFFER_SAMPLES is not the same for all attached \
                 renderbuffers; if the value of GL_TEXTURE_SAMPLES is the not same for all \
                 attached textures; or, if the attached images are a mix of renderbuffers \
                 and textures, the value of GL_RENDERBUFFER_SAMPLES does not match the value \
                 of GL_TEXTURE_SAMPLES. \n\
                 -  The value of GL_TEXTURE_FIXED_SAMPLE_LOCATIONS is not the same for all \
                 attached textures; or, if the attached images are a mix of renderbuffers \
                 and textures, the value of GL_TEXTURE_FIXED_SAMPLE_LOCATIONS is not GL_TRUE \
                 for all attached textures."
            }
            FramebufferStatus::IncompleteLayerTargets => {
                "One or more framebuffer attachment is layered, and any populated attachment \
                 is not layered, or if all populated color attachments are not from textures \
                 of the same target."
            }
        }
    }
}

/// Attachment points of a framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferAttachment {
    Color(u32),
    Depth,
    Stencil,
    DepthStencil,
}

impl From<FramebufferAttachment> for GLenum {
    fn from(attachment: FramebufferAttachment) -> GLenum {
        match attachment {
            FramebufferAttachment::Color(index) => gl::COLOR_ATTACHMENT0 + index,
            FramebufferAttachment::Depth => gl::DEPTH_ATTACHMENT,
            FramebufferAttachment::Stencil => gl::STENCIL_ATTACHMENT,
            FramebufferAttachment::DepthStencil => gl::DEPTH_STENCIL_ATTACHMENT,
        }
    }
}

/// The renderbuffer target and its binding point.
pub const RENDERBUFFER_BINDING: BindingPoint =
    BindingPoint::new(gl::RENDERBUFFER_BINDING, "GL_RENDERBUFFER_BINDING");

pub const VERTEX_ARRAY_BINDING: BindingPoint =
    BindingPoint::new(gl::VERTEX_ARRAY_BINDING, "GL_VERTEX_ARRAY_BINDING");

pub const TRANSFORM_FEEDBACK_BINDING: BindingPoint =
    BindingPoint::new(gl::TRANSFORM_FEEDBACK_BINDING, "GL_TRANSFORM_FEEDBACK_BINDING");

pub const CURRENT_PROGRAM: BindingPoint =
    BindingPoint::new(gl::CURRENT_PROGRAM, "GL_CURRENT_PROGRAM");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_attachments_are_offsets() {
        assert_eq!(GLenum::from(FramebufferAttachment::Color(0)), gl::COLOR_ATTACHMENT0);
        assert_eq!(GLenum::from(FramebufferAttachment::Color(3)), gl::COLOR_ATTACHMENT3);
        assert_eq!(
            GLenum::from(FramebufferAttachment::DepthStencil),
            gl::DEPTH_STENCIL_ATTACHMENT
        );
    }

    #[test]
    fn statuses_round_trip_from_the_driver_value() {
        assert_eq!(
            FramebufferStatus::from_raw(gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT),
            Some(FramebufferStatus::IncompleteMissingAttachment)
        );
        assert_eq!(FramebufferStatus::from_raw(0), None);
    }
}
