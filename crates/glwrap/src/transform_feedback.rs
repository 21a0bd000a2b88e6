//! Transform feedback objects (GL 4.0).

use std::fmt;

use gl::types::GLuint;
use glwrap_core::enums::{BindingPoint, TransformFeedbackPrimitiveType, TRANSFORM_FEEDBACK_BINDING};
use glwrap_core::{Generate, Object, ObjectKind};

use crate::bind::{self, Bindable};

pub enum TransformFeedbackKind {}

impl ObjectKind for TransformFeedbackKind {
    const NAME: &'static str = "transform feedback";

    fn delete(name: GLuint) {
        crate::gl_call!(DeleteTransformFeedbacks(1, &name));
    }
}

impl Generate for TransformFeedbackKind {
    fn generate() -> GLuint {
        let mut name = 0;
        crate::gl_call!(GenTransformFeedbacks(1, &mut name));
        name
    }
}

/// Captures the buffers bound to the indexed `GL_TRANSFORM_FEEDBACK_BUFFER`
/// slots while it is bound.
#[derive(Clone, PartialEq, Eq)]
pub struct TransformFeedback {
    object: Object<TransformFeedbackKind>,
}

impl TransformFeedback {
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
        crate::gl_call!(BindTransformFeedback(gl::TRANSFORM_FEEDBACK, self.name()));
    }

    #[track_caller]
    pub fn unbind(&self) {
        crate::gl_call!(BindTransformFeedback(gl::TRANSFORM_FEEDBACK, 0));
    }

    pub fn is_bound(&self) -> bool {
        bind::current_binding(TRANSFORM_FEEDBACK_BINDING) == self.name()
    }

    /// Binds this object and starts capturing `mode` primitives.
    ///
    /// Capture ends and the object is unbound when the guard is dropped.
    #[track_caller]
    pub fn begin(&self, mode: TransformFeedbackPrimitiveType) -> ActiveTransformFeedback<'_> {
        self.bind();
        crate::gl_call!(BeginTransformFeedback(mode.into()));
        tracing::trace!(name = self.name(), ?mode, "transform feedback started");
        ActiveTransformFeedback {
            feedback: self,
            mode,
            paused: false,
        }
    }
}

impl Default for TransformFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransformFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransformFeedback").field(&self.object).finish()
    }
}

impl Bindable for TransformFeedback {
    fn binding_point(&self) -> BindingPoint {
        TRANSFORM_FEEDBACK_BINDING
    }

    fn raw_name(&self) -> GLuint {
        self.name()
    }

    fn bind(&self) {
        TransformFeedback::bind(self);
    }
}

/// A running capture, see [`TransformFeedback::begin`].
#[must_use = "dropping the guard ends the capture immediately"]
pub struct ActiveTransformFeedback<'a> {
    feedback: &'a TransformFeedback,
    mode: TransformFeedbackPrimitiveType,
    paused: bool,
}

impl ActiveTransformFeedback<'_> {
    pub fn mode(&self) -> TransformFeedbackPrimitiveType {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Suspends capturing. Does nothing if already paused.
    #[track_caller]
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        bind::ensure_bound(self.feedback);
        crate::gl_call!(PauseTransformFeedback());
        self.paused = true;
    }

    /// Continues a paused capture. Does nothing if not paused.
    #[track_caller]
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        bind::ensure_bound(self.feedback);
        crate::gl_call!(ResumeTransformFeedback());
        self.paused = false;
    }
}

impl Drop for ActiveTransformFeedback<'_> {
    fn drop(&mut self) {
        crate::gl_call!(EndTransformFeedback());
        self.feedback.unbind();
        tracing::trace!(name = self.feedback.name(), "transform feedback ended");
    }
}

impl fmt::Debug for ActiveTransformFeedback<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveTransformFeedback")
            .field("feedback", &self.feedback.name())
            .field("mode", &self.mode)
            .field("paused", &self.paused)
            .finish()
    }
}
