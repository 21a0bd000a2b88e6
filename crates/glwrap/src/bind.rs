//! Binding queries and the `bindcheck` layer.
//!
//! Most GL functions act on whatever object is bound to a target, not on the
//! object the wrapper method was called through. With the `bindcheck`
//! feature every such method first asks the driver what is bound, reports a
//! `BIND CHECK FAILURE` if it is not the expected object, and binds it.
//!
//! The check is reactive: it compares against the driver's state at the time
//! of the call, which another library sharing the context may change at any
//! moment. It is a debugging aid and never part of correctness.

use gl::types::{GLint, GLuint};
use glwrap_core::enums::BindingPoint;
use glwrap_debug::bind_check::BindState;

#[cfg(feature = "bindcheck")]
use std::panic::Location;

#[cfg(feature = "bindcheck")]
use glwrap_debug::bind_check;

/// The name bound to `point`, as reported by `glGetIntegerv`.
pub fn current_binding(point: BindingPoint) -> GLuint {
    let mut bound: GLint = 0;
    crate::gl_call!(GetIntegerv(point.query, &mut bound));
    bound as GLuint
}

/// The name bound to slot `index` of an indexed `point`.
pub fn current_indexed_binding(point: BindingPoint, index: GLuint) -> GLuint {
    let mut bound: GLint = 0;
    crate::gl_call!(GetIntegeri_v(point.query, index, &mut bound));
    bound as GLuint
}

/// An object that is used by binding it to a target.
pub trait Bindable {
    /// The query that returns what is bound to this object's target.
    fn binding_point(&self) -> BindingPoint;

    fn raw_name(&self) -> GLuint;

    fn bind(&self);

    /// Asks the driver whether this object is the one bound.
    fn is_bound(&self) -> bool {
        current_binding(self.binding_point()) == self.raw_name()
    }
}

/// Reports and fixes a call through an object that is not bound.
#[track_caller]
#[inline]
pub fn ensure_bound<B: Bindable + ?Sized>(object: &B) {
    #[cfg(feature = "bindcheck")]
    {
        let point = object.binding_point();
        let state = BindState::classify(object.raw_name(), current_binding(point));
        if let Some(message) = bind_check::bind_failure(state, point.name) {
            glwrap_debug::report(message.at(Location::caller()));
            object.bind();
        }
    }

    #[cfg(not(feature = "bindcheck"))]
    let _ = object;
}

/// Reports if only the default object `0` is bound to `point`.
#[track_caller]
#[inline]
pub fn check_for_default_binding(point: BindingPoint) {
    #[cfg(feature = "bindcheck")]
    {
        if current_binding(point) == 0 {
            let message = bind_check::default_binding_failure(point.name);
            glwrap_debug::report(message.at(Location::caller()));
        }
    }

    #[cfg(not(feature = "bindcheck"))]
    let _ = point;
}

/// Reports and fixes a uniform upload while `program` is not in use.
#[track_caller]
#[inline]
pub fn ensure_active_program(program: GLuint) {
    #[cfg(feature = "bindcheck")]
    {
        let active = current_binding(glwrap_core::enums::CURRENT_PROGRAM);
        if let Some(message) = bind_check::active_program_failure(program, active) {
            glwrap_debug::report(message.at(Location::caller()));
            crate::gl_call!(UseProgram(program));
        }
    }

    #[cfg(not(feature = "bindcheck"))]
    let _ = program;
}

/// Whether `expected` is bound according to a previously queried `bound`.
pub fn classify(expected: GLuint, bound: GLuint) -> BindState {
    BindState::classify(expected, bound)
}

#[cfg(test)]
mod tests {
    use glwrap_core::enums::CURRENT_PROGRAM;

    use super::*;

    #[test]
    fn classification_distinguishes_default_from_other() {
        assert_eq!(classify(3, 3), BindState::Bound);
        assert_eq!(classify(3, 0), BindState::Default);
        assert_eq!(classify(3, 9), BindState::Other(9));
    }

    #[test]
    fn bind_checks_are_on_by_default() {
        let manifest = include_str!("../Cargo.toml");
        assert!(manifest.contains(r#"default = ["debug", "bindcheck"]"#));
    }

    #[test]
    fn current_program_query_is_named() {
        assert_eq!(CURRENT_PROGRAM.name, "GL_CURRENT_PROGRAM");
        assert_eq!(CURRENT_PROGRAM.query, gl::CURRENT_PROGRAM);
    }
}
