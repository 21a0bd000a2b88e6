//! Typed OpenGL object wrappers.
//!
//! This crate ties together [`glwrap_core`] (object lifetimes, typed enums
//! and bitfields) and [`glwrap_debug`] (error reporting) into wrappers for
//! the GL object categories.
//!
//! # Overview
//!
//! - [`loader`] loads the function pointers; [`Capabilities`] records what
//!   the context supports.
//! - [`gl_call!`] wraps a raw driver call and, with the `debug` feature,
//!   reports any error it raised.
//! - [`Buffer`], [`Texture`], [`Shader`], [`Program`], [`Uniform`],
//!   [`VertexArray`], [`Framebuffer`], [`Renderbuffer`] and
//!   [`TransformFeedback`] share ownership of their GL name and delete it
//!   when the last handle is dropped.
//! - [`context`] holds the free state and draw functions.
//!
//! # Features
//!
//! - `debug` (default): check `glGetError` after every call.
//! - `bindcheck` (default): verify that the object a method is called on
//!   is the one bound to its target, see [`bind`]. Release builds usually
//!   turn off both with `default-features = false`.
//!
//! All wrappers are tied to the thread that owns the context and are
//! neither `Send` nor `Sync`.

pub mod bind;
pub mod buffer;
pub mod bytes;
pub mod call;
pub mod capabilities;
pub mod context;
pub mod error;
pub mod framebuffer;
pub mod loader;
pub mod program;
pub mod renderbuffer;
pub mod shader;
pub mod texture;
pub mod transform_feedback;
pub mod uniform;
pub mod vertex_array;

// Used by `gl_call!` expansions in other crates.
pub use gl;
pub use glwrap_core::{enums, Bit, Bitfield};
pub use glwrap_debug as debug;

// Re-export primary types at crate root for convenience.
pub use bind::Bindable;
pub use buffer::{
    ArrayBuffer, AtomicCounterBuffer, Buffer, IndexBuffer, IndexedBuffer, Mapping,
    ShaderStorageBuffer, TransformFeedbackBuffer, UniformBuffer,
};
pub use bytes::Pod;
pub use capabilities::{Capabilities, Version};
pub use error::GlwrapError;
pub use framebuffer::{DrawFramebuffer, Framebuffer, FramebufferObject, ReadFramebuffer};
pub use program::Program;
pub use renderbuffer::Renderbuffer;
pub use shader::{Shader, ShaderSource};
pub use texture::{Texture, Texture1D, Texture2D, Texture2DArray, Texture3D, TextureCube};
pub use transform_feedback::{ActiveTransformFeedback, TransformFeedback};
pub use uniform::{Uniform, UniformValue};
pub use vertex_array::{VertexArray, VertexAttrib};
