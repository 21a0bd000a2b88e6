//! Free functions acting on the current context.
//!
//! These forward to the driver one to one, taking the typed enums of
//! `glwrap_core` instead of raw `GLenum`s.

use std::ffi::CStr;

use anyhow::Result;
use gl::types::{GLenum, GLint, GLsizei, GLuint};
use glwrap_core::enums::{
    BlendEquation, BlendFunction, BufferSelectBit, BufferType, Capability, CompareFunc,
    Face, FaceOrientation, IndexType, MagFilter, MemoryBarrierBit, PolyMode, PrimitiveType,
    StringName, TextureType, VERTEX_ARRAY_BINDING,
};
use glwrap_core::Bitfield;
use glwrap_debug::GlError;

use crate::bind;
use crate::capabilities::require_loaded;

pub use crate::call::clear_errors;

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Reads and clears one error flag.
///
/// This bypasses the debug layer, which would otherwise consume the flag.
pub fn get_error() -> Option<GlError> {
    GlError::from_raw(unsafe { gl::GetError() })
}

#[track_caller]
pub fn get_integer(pname: GLenum) -> GLint {
    let mut value: GLint = 0;
    crate::gl_call!(GetIntegerv(pname, &mut value));
    value
}

/// `glGetString`, or `None` if the driver returned null.
#[track_caller]
pub fn get_string(name: StringName) -> Option<String> {
    let ptr = crate::gl_call!(GetString(name.into()));
    if ptr.is_null() {
        return None;
    }
    let text = unsafe { CStr::from_ptr(ptr.cast()) };
    Some(text.to_string_lossy().into_owned())
}

/// Whether functions are loaded and a context is current on this thread.
pub fn is_context_current() -> bool {
    gl::GetString::is_loaded() && unsafe { !gl::GetString(gl::VERSION).is_null() }
}

// ---------------------------------------------------------------------------
// Fixed function state
// ---------------------------------------------------------------------------

#[track_caller]
pub fn clear(buffers: impl Into<Bitfield<BufferSelectBit>>) {
    crate::gl_call!(Clear(buffers.into().bits()));
}

#[track_caller]
pub fn clear_color(r: f32, g: f32, b: f32, a: f32) {
    crate::gl_call!(ClearColor(r, g, b, a));
}

#[track_caller]
pub fn clear_depth(depth: f64) {
    crate::gl_call!(ClearDepth(depth));
}

#[track_caller]
pub fn viewport(x: i32, y: i32, width: u32, height: u32) {
    crate::gl_call!(Viewport(x, y, width as GLsizei, height as GLsizei));
}

#[track_caller]
pub fn enable(capability: Capability) {
    crate::gl_call!(Enable(capability.into()));
}

#[track_caller]
pub fn disable(capability: Capability) {
    crate::gl_call!(Disable(capability.into()));
}

#[track_caller]
pub fn is_enabled(capability: Capability) -> bool {
    let enabled = crate::gl_call!(IsEnabled(capability.into()));
    enabled == gl::TRUE
}

#[track_caller]
pub fn blend_func(src: BlendFunction, dst: BlendFunction) {
    crate::gl_call!(BlendFunc(src.into(), dst.into()));
}

#[track_caller]
pub fn blend_equation(equation: BlendEquation) {
    crate::gl_call!(BlendEquation(equation.into()));
}

#[track_caller]
pub fn depth_func(func: CompareFunc) {
    crate::gl_call!(DepthFunc(func.into()));
}

#[track_caller]
pub fn depth_mask(write: bool) {
    crate::gl_call!(DepthMask(if write { gl::TRUE } else { gl::FALSE }));
}

#[track_caller]
pub fn cull_face(face: Face) {
    crate::gl_call!(CullFace(face.into()));
}

#[track_caller]
pub fn front_face(orientation: FaceOrientation) {
    crate::gl_call!(FrontFace(orientation.into()));
}

#[track_caller]
pub fn polygon_mode(face: Face, mode: PolyMode) {
    crate::gl_call!(PolygonMode(face.into(), mode.into()));
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Draws `count` vertices of the bound vertex array starting at `first`.
#[track_caller]
pub fn draw_arrays(mode: PrimitiveType, first: GLint, count: GLsizei) {
    bind::check_for_default_binding(VERTEX_ARRAY_BINDING);
    crate::gl_call!(DrawArrays(mode.into(), first, count));
}

#[track_caller]
pub fn draw_arrays_instanced(mode: PrimitiveType, first: GLint, count: GLsizei, instances: GLsizei) {
    bind::check_for_default_binding(VERTEX_ARRAY_BINDING);
    crate::gl_call!(DrawArraysInstanced(mode.into(), first, count, instances));
}

/// Draws `count` indices of the bound index buffer. `offset` is in indices,
/// not bytes.
#[track_caller]
pub fn draw_elements(mode: PrimitiveType, count: GLsizei, index_type: IndexType, offset: usize) {
    check_element_bindings();
    crate::gl_call!(DrawElements(
        mode.into(),
        count,
        index_type.into(),
        (offset * index_type.size()) as *const _
    ));
}

#[track_caller]
pub fn draw_elements_instanced(
    mode: PrimitiveType,
    count: GLsizei,
    index_type: IndexType,
    offset: usize,
    instances: GLsizei,
) {
    check_element_bindings();
    crate::gl_call!(DrawElementsInstanced(
        mode.into(),
        count,
        index_type.into(),
        (offset * index_type.size()) as *const _,
        instances
    ));
}

#[track_caller]
fn check_element_bindings() {
    bind::check_for_default_binding(VERTEX_ARRAY_BINDING);
    bind::check_for_default_binding(BufferType::ElementArray.binding());
}

/// `glDispatchCompute` (GL 4.3).
#[track_caller]
pub fn dispatch_compute(x: GLuint, y: GLuint, z: GLuint) -> Result<()> {
    require_loaded("glDispatchCompute", gl::DispatchCompute::is_loaded())?;
    crate::gl_call!(DispatchCompute(x, y, z));
    Ok(())
}

/// `glMemoryBarrier` (GL 4.2).
#[track_caller]
pub fn memory_barrier(barriers: impl Into<Bitfield<MemoryBarrierBit>>) -> Result<()> {
    require_loaded("glMemoryBarrier", gl::MemoryBarrier::is_loaded())?;
    crate::gl_call!(MemoryBarrier(barriers.into().bits()));
    Ok(())
}

/// Copies a rectangle from the bound read framebuffer to the bound draw
/// framebuffer. Rectangles are `[x0, y0, x1, y1]`.
#[track_caller]
pub fn blit_framebuffer(
    src: [GLint; 4],
    dst: [GLint; 4],
    buffers: impl Into<Bitfield<BufferSelectBit>>,
    filter: MagFilter,
) {
    crate::gl_call!(BlitFramebuffer(
        src[0],
        src[1],
        src[2],
        src[3],
        dst[0],
        dst[1],
        dst[2],
        dst[3],
        buffers.into().bits(),
        filter.into()
    ));
}

#[track_caller]
pub fn flush() {
    crate::gl_call!(Flush());
}

#[track_caller]
pub fn finish() {
    crate::gl_call!(Finish());
}

// ---------------------------------------------------------------------------
// State reset
// ---------------------------------------------------------------------------

const RESET_TEXTURE_TYPES: [TextureType; 8] = [
    TextureType::Texture1D,
    TextureType::Texture2D,
    TextureType::Texture3D,
    TextureType::Texture1DArray,
    TextureType::Texture2DArray,
    TextureType::TextureRectangle,
    TextureType::TextureCubeMap,
    TextureType::Texture2DMultisample,
];

const RESET_BUFFER_TYPES: [BufferType; 9] = [
    BufferType::Array,
    BufferType::CopyRead,
    BufferType::CopyWrite,
    BufferType::DrawIndirect,
    BufferType::PixelPack,
    BufferType::PixelUnpack,
    BufferType::Texture,
    BufferType::TransformFeedback,
    BufferType::Uniform,
];

/// Returns the context to its default bindings: no program, no textures on
/// any unit, no buffers, no vertex array, the default framebuffer, and
/// blending off with `(ONE, ZERO)`.
///
/// Useful when sharing a context with code that makes assumptions about the
/// state it is handed.
#[track_caller]
pub fn reset_bindings() {
    crate::gl_call!(UseProgram(0));

    let units = get_integer(gl::MAX_TEXTURE_IMAGE_UNITS).max(0) as GLuint;
    for unit in 0..units {
        crate::gl_call!(ActiveTexture(gl::TEXTURE0 + unit));
        for texture_type in RESET_TEXTURE_TYPES {
            crate::gl_call!(BindTexture(texture_type.into(), 0));
        }
    }
    crate::gl_call!(ActiveTexture(gl::TEXTURE0));

    // The element array binding belongs to the vertex array, so it goes
    // with it.
    crate::gl_call!(BindVertexArray(0));
    for buffer_type in RESET_BUFFER_TYPES {
        crate::gl_call!(BindBuffer(buffer_type.into(), 0));
    }

    crate::gl_call!(Disable(gl::BLEND));
    crate::gl_call!(BlendFunc(gl::ONE, gl::ZERO));

    crate::gl_call!(BindFramebuffer(gl::FRAMEBUFFER, 0));
    tracing::debug!(texture_units = units, "reset bindings");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_covers_every_buffer_binding_but_the_element_array() {
        assert!(!RESET_BUFFER_TYPES.contains(&BufferType::ElementArray));
        assert!(RESET_BUFFER_TYPES.contains(&BufferType::Array));
        assert!(RESET_TEXTURE_TYPES.contains(&TextureType::TextureCubeMap));
    }
}
