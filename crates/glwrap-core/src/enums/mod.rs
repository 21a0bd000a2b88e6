//! Typed wrappers around the `GLenum` values the wrappers accept.
//!
//! Every enum is `#[repr(u32)]` with the GL constant as its discriminant, so
//! `GLenum::from(value)` is free. Raw values coming back from the driver are
//! converted with `from_raw`, which returns `None` for values the enum does
//! not model.
//!
//! Target enums also know the query enum of their binding point
//! (`GL_ARRAY_BUFFER` → `GL_ARRAY_BUFFER_BINDING`) together with its name,
//! which the bind checks print.

mod buffer;
mod drawing;
mod error;
mod framebuffer;
mod shader;
mod texture;

pub use buffer::*;
pub use drawing::*;
pub use error::*;
pub use framebuffer::*;
pub use shader::*;
pub use texture::*;

use gl::types::GLenum;

/// A binding point query: the enum passed to `glGetIntegerv` and its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingPoint {
    pub query: GLenum,
    pub name: &'static str,
}

impl BindingPoint {
    pub const fn new(query: GLenum, name: &'static str) -> Self {
        Self { query, name }
    }
}

/// Declares a `#[repr(u32)]` enum whose discriminants are GL constants.
macro_rules! gl_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::num_derive::FromPrimitive,
            ::num_derive::ToPrimitive,
        )]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// Converts a raw value returned by the driver.
            pub fn from_raw(raw: ::gl::types::GLenum) -> Option<Self> {
                ::num_traits::FromPrimitive::from_u32(raw)
            }
        }

        impl From<$name> for ::gl::types::GLenum {
            fn from(value: $name) -> ::gl::types::GLenum {
                value as ::gl::types::GLenum
            }
        }
    };
}

pub(crate) use gl_enum;
