//! Plain-data element types for buffer uploads and mappings.

use std::mem::{align_of, size_of, size_of_val};

/// A type that can be uploaded to and mapped from GPU memory as raw bytes.
///
/// # Safety
///
/// Only implement on types with no padding, no pointers or references, and
/// for which every bit pattern is a valid value, e.g. a `#[repr(C)]` struct
/// of `f32` fields.
///
/// ```rust,ignore
/// #[repr(C)]
/// #[derive(Clone, Copy)]
/// struct Vertex {
///     position: [f32; 3],
///     uv: [f32; 2],
/// }
///
/// unsafe impl Pod for Vertex {}
/// ```
pub unsafe trait Pod: Copy + 'static {}

macro_rules! impl_pod {
    ($($ty:ty),*) => {
        $(unsafe impl Pod for $ty {})*
    };
}

impl_pod!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

unsafe impl<T: Pod, const N: usize> Pod for [T; N] {}

/// Views a slice of plain data as bytes.
pub fn as_bytes<T: Pod>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr().cast(), size_of_val(data)) }
}

/// Number of whole `T` elements in `bytes` bytes.
pub fn element_count<T>(bytes: usize) -> usize {
    match size_of::<T>() {
        0 => 0,
        size => bytes / size,
    }
}

/// Whether a mapped pointer can be read as `T`.
pub(crate) fn is_aligned<T>(ptr: *const u8) -> bool {
    ptr as usize % align_of::<T>() == 0
}
