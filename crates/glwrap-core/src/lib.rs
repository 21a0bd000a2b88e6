//! Context-free building blocks of the glwrap workspace.
//!
//! Nothing in this crate calls into the driver by itself:
//!
//! - [`Object`] is the shared ownership cell that deletes a GL name exactly
//!   once, when its last owner is dropped. The generate/delete functions are
//!   supplied by an [`ObjectKind`], so the cell can be exercised without a
//!   context.
//! - [`RefCounted`] is the non-atomic shared counter `Object` is built on.
//! - [`Bitfield`] is a typed `GLbitfield`.
//! - [`enums`] holds the typed `GLenum` wrappers and the target → binding
//!   point tables used by the bind checks.

pub mod bitfield;
pub mod enums;
pub mod object;
pub mod ref_counted;

pub use bitfield::{Bit, Bitfield};
pub use object::{Generate, Object, ObjectKind};
pub use ref_counted::RefCounted;

pub use gl::types::{GLbitfield, GLenum, GLint, GLuint};
