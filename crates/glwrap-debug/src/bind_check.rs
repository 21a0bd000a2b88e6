//! Classification and message text of the bind checks.
//!
//! The driver queries live in `glwrap::bind`; this module only decides what
//! a `(expected, bound)` pair means and how to word it.

use gl::types::GLuint;

use crate::output::ErrorMessage;

pub const BIND_CHECK_FAILURE: &str = "BIND CHECK FAILURE";
pub const ACTIVE_PROGRAM_CHECK_FAILURE: &str = "ACTIVE PROGRAM CHECK FAILURE";

/// How the object a method was called through relates to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
    /// The object is bound.
    Bound,
    /// Some other object is bound.
    Other(GLuint),
    /// Only the default object `0` is bound.
    Default,
}

impl BindState {
    pub fn classify(expected: GLuint, bound: GLuint) -> BindState {
        if bound == expected {
            BindState::Bound
        } else if bound == 0 {
            BindState::Default
        } else {
            BindState::Other(bound)
        }
    }

    pub fn is_bound(self) -> bool {
        self == BindState::Bound
    }
}

/// The report for calling through an object that is not bound to `target`.
pub fn bind_failure(state: BindState, target: &str) -> Option<ErrorMessage> {
    let message = match state {
        BindState::Bound => return None,
        BindState::Other(_) => format!(
            "The function is called through an object that is different than the one, \
             currently bound to {target}.\nDid you forget to call bind() on the object? \n\n"
        ),
        BindState::Default => default_binding_message(target),
    };
    Some(ErrorMessage::new(BIND_CHECK_FAILURE, message))
}

/// The report for a free function that needs something bound to `target`.
pub fn default_binding_failure(target: &str) -> ErrorMessage {
    ErrorMessage::new(BIND_CHECK_FAILURE, default_binding_message(target))
}

/// The report for a uniform upload through a program that is not in use.
pub fn active_program_failure(expected: GLuint, active: GLuint) -> Option<ErrorMessage> {
    if expected == active {
        return None;
    }
    Some(ErrorMessage::new(
        ACTIVE_PROGRAM_CHECK_FAILURE,
        "The currently active program is different than the one, this function is \
         supposed to operate on.\nDid you forget to call use_program() on the program?",
    ))
}

fn default_binding_message(target: &str) -> String {
    format!(
        "The function requires an object to be bound to {target} but only the default \
         object '0' is bound to that target.\n\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(BindState::classify(5, 5), BindState::Bound);
        assert_eq!(BindState::classify(5, 7), BindState::Other(7));
        assert_eq!(BindState::classify(5, 0), BindState::Default);
        // Checking the default object against itself is not a failure.
        assert!(BindState::classify(0, 0).is_bound());
    }

    #[test]
    fn bound_objects_produce_no_report() {
        assert!(bind_failure(BindState::Bound, "GL_ARRAY_BUFFER").is_none());
        assert!(active_program_failure(3, 3).is_none());
    }

    #[test]
    fn different_object_message_names_the_target() {
        let report = bind_failure(BindState::Other(9), "GL_ARRAY_BUFFER").unwrap();
        assert_eq!(report.title, BIND_CHECK_FAILURE);
        assert!(report.message.starts_with(
            "The function is called through an object that is different than the one, \
             currently bound to GL_ARRAY_BUFFER."
        ));
        assert!(report.message.contains("Did you forget to call bind() on the object?"));
    }

    #[test]
    fn default_object_message() {
        let report = bind_failure(BindState::Default, "GL_TEXTURE_2D").unwrap();
        assert_eq!(
            report.message,
            "The function requires an object to be bound to GL_TEXTURE_2D but only the \
             default object '0' is bound to that target.\n\n"
        );
        assert_eq!(default_binding_failure("GL_TEXTURE_2D").message, report.message);
    }

    #[test]
    fn inactive_program_message() {
        let report = active_program_failure(3, 0).unwrap();
        assert_eq!(report.title, ACTIVE_PROGRAM_CHECK_FAILURE);
        assert!(report.message.ends_with("Did you forget to call use_program() on the program?"));
    }
}
