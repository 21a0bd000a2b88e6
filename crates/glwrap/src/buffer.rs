//! Buffer objects.
//!
//! `Buffer<T>` is a buffer whose target is fixed by the marker type `T`
//! (see [`target`]), so an `ArrayBuffer` can only ever be bound to
//! `GL_ARRAY_BUFFER`. Element types of uploads and mappings are chosen per
//! call and must be [`Pod`].

use std::fmt;
use std::marker::PhantomData;
use std::mem::size_of;
use std::ops::Deref;

use anyhow::{anyhow, bail, Result};
use gl::types::{GLenum, GLint, GLintptr, GLsizeiptr, GLuint};
use glwrap_core::enums::{
    BindingPoint, BufferMapAccess, BufferMapAccessFlags, BufferStorageBit, BufferType,
    BufferUsage, IndexedBufferType, VERTEX_ARRAY_BINDING,
};
use glwrap_core::{Bitfield, Generate, Object, ObjectKind};

use crate::bind::{self, Bindable};
use crate::bytes::{self, Pod};
use crate::capabilities::require_loaded;

pub enum BufferKind {}

impl ObjectKind for BufferKind {
    const NAME: &'static str = "buffer";

    fn delete(name: GLuint) {
        crate::gl_call!(DeleteBuffers(1, &name));
    }
}

impl Generate for BufferKind {
    fn generate() -> GLuint {
        let mut name = 0;
        crate::gl_call!(GenBuffers(1, &mut name));
        name
    }
}

/// A buffer binding target known at compile time.
pub trait BufferTarget: 'static {
    const TYPE: BufferType;
}

/// A target that also has numbered binding slots.
pub trait IndexedBufferTarget: BufferTarget {
    const INDEXED: IndexedBufferType;
}

/// Marker types for every buffer target.
pub mod target {
    use super::{BufferTarget, IndexedBufferTarget};
    use glwrap_core::enums::{BufferType, IndexedBufferType};

    macro_rules! buffer_targets {
        ($($name:ident => $ty:ident),* $(,)?) => {
            $(
                #[derive(Debug)]
                pub enum $name {}

                impl BufferTarget for $name {
                    const TYPE: BufferType = BufferType::$ty;
                }
            )*
        };
    }

    buffer_targets! {
        Array => Array,
        AtomicCounter => AtomicCounter,
        CopyRead => CopyRead,
        CopyWrite => CopyWrite,
        DispatchIndirect => DispatchIndirect,
        DrawIndirect => DrawIndirect,
        ElementArray => ElementArray,
        PixelPack => PixelPack,
        PixelUnpack => PixelUnpack,
        ShaderStorage => ShaderStorage,
        Texture => Texture,
        TransformFeedback => TransformFeedback,
        Uniform => Uniform,
    }

    impl IndexedBufferTarget for AtomicCounter {
        const INDEXED: IndexedBufferType = IndexedBufferType::AtomicCounter;
    }

    impl IndexedBufferTarget for ShaderStorage {
        const INDEXED: IndexedBufferType = IndexedBufferType::ShaderStorage;
    }

    impl IndexedBufferTarget for TransformFeedback {
        const INDEXED: IndexedBufferType = IndexedBufferType::TransformFeedback;
    }

    impl IndexedBufferTarget for Uniform {
        const INDEXED: IndexedBufferType = IndexedBufferType::Uniform;
    }
}

pub struct Buffer<T: BufferTarget> {
    object: Object<BufferKind>,
    _target: PhantomData<T>,
}

pub type ArrayBuffer = Buffer<target::Array>;
pub type IndexBuffer = Buffer<target::ElementArray>;
pub type TextureBuffer = Buffer<target::Texture>;
pub type PixelPackBuffer = Buffer<target::PixelPack>;
pub type PixelUnpackBuffer = Buffer<target::PixelUnpack>;
pub type CopyReadBuffer = Buffer<target::CopyRead>;
pub type CopyWriteBuffer = Buffer<target::CopyWrite>;
pub type DrawIndirectBuffer = Buffer<target::DrawIndirect>;
pub type DispatchIndirectBuffer = Buffer<target::DispatchIndirect>;

impl<T: BufferTarget> Buffer<T> {
    pub fn new() -> Self {
        Self::from_object(Object::new())
    }

    /// Wraps a buffer created elsewhere without taking ownership of it.
    pub fn from_raw(name: GLuint) -> Self {
        Self::from_object(Object::from_raw(name))
    }

    fn from_object(object: Object<BufferKind>) -> Self {
        Self {
            object,
            _target: PhantomData,
        }
    }

    pub fn name(&self) -> GLuint {
        self.object.name()
    }

    pub fn target(&self) -> BufferType {
        T::TYPE
    }

    #[track_caller]
    pub fn bind(&self) {
        crate::gl_call!(BindBuffer(T::TYPE.into(), self.name()));
    }

    /// Binds buffer `0` to this buffer's target.
    #[track_caller]
    pub fn unbind(&self) {
        crate::gl_call!(BindBuffer(T::TYPE.into(), 0));
    }

    pub fn is_bound(&self) -> bool {
        bind::current_binding(T::TYPE.binding()) == self.name()
    }

    /// A non-owning handle to the buffer bound to this target.
    pub fn currently_bound() -> Self {
        Self::from_raw(bind::current_binding(T::TYPE.binding()))
    }

    /// Creates a new data store initialized with `data` (`glBufferData`).
    #[track_caller]
    pub fn data<E: Pod>(&self, data: &[E], usage: BufferUsage) {
        self.check_binding();
        let bytes = bytes::as_bytes(data);
        crate::gl_call!(BufferData(
            T::TYPE.into(),
            bytes.len() as GLsizeiptr,
            bytes.as_ptr().cast(),
            usage.into()
        ));
    }

    /// Creates a new uninitialized data store of `size` bytes.
    #[track_caller]
    pub fn data_size(&self, size: usize, usage: BufferUsage) {
        self.check_binding();
        crate::gl_call!(BufferData(
            T::TYPE.into(),
            size as GLsizeiptr,
            std::ptr::null(),
            usage.into()
        ));
    }

    /// Overwrites part of the data store, starting `offset` bytes in.
    #[track_caller]
    pub fn sub_data<E: Pod>(&self, offset: usize, data: &[E]) {
        self.check_binding();
        let bytes = bytes::as_bytes(data);
        crate::gl_call!(BufferSubData(
            T::TYPE.into(),
            offset as GLintptr,
            bytes.len() as GLsizeiptr,
            bytes.as_ptr().cast()
        ));
    }

    /// Size of the data store in bytes.
    #[track_caller]
    pub fn size(&self) -> usize {
        bind::ensure_bound(self);
        let mut size: GLint = 0;
        crate::gl_call!(GetBufferParameteriv(T::TYPE.into(), gl::BUFFER_SIZE, &mut size));
        size.max(0) as usize
    }

    /// Creates an immutable data store (`glBufferStorage`, GL 4.4).
    #[track_caller]
    pub fn storage<E: Pod>(&self, data: &[E], flags: Bitfield<BufferStorageBit>) -> Result<()> {
        require_loaded("glBufferStorage", gl::BufferStorage::is_loaded())?;
        self.check_binding();
        let bytes = bytes::as_bytes(data);
        crate::gl_call!(BufferStorage(
            T::TYPE.into(),
            bytes.len() as GLsizeiptr,
            bytes.as_ptr().cast(),
            flags.bits()
        ));
        Ok(())
    }

    /// Maps the whole data store of this buffer.
    #[track_caller]
    pub fn map<E: Pod>(&self, access: BufferMapAccess) -> Result<Mapping<'_, T, E>> {
        bind::ensure_bound(self);
        let ptr = crate::gl_call!(MapBuffer(T::TYPE.into(), access.into()));
        let mut size: GLint = 0;
        crate::gl_call!(GetBufferParameteriv(T::TYPE.into(), gl::BUFFER_SIZE, &mut size));

        Mapping::new(
            self,
            ptr.cast(),
            size.max(0) as usize,
            access != BufferMapAccess::WriteOnly,
            access != BufferMapAccess::ReadOnly,
        )
    }

    /// Maps `length` bytes of the data store starting `offset` bytes in.
    #[track_caller]
    pub fn map_range<E: Pod>(
        &self,
        offset: usize,
        length: usize,
        access: Bitfield<BufferMapAccessFlags>,
    ) -> Result<Mapping<'_, T, E>> {
        bind::ensure_bound(self);
        let ptr = crate::gl_call!(MapBufferRange(
            T::TYPE.into(),
            offset as GLintptr,
            length as GLsizeiptr,
            access.bits()
        ));

        Mapping::new(
            self,
            ptr.cast(),
            length,
            access.test(BufferMapAccessFlags::MapRead),
            access.test(BufferMapAccessFlags::MapWrite),
        )
    }

    #[track_caller]
    fn check_binding(&self) {
        bind::ensure_bound(self);
        if T::TYPE == BufferType::Array {
            bind::check_for_default_binding(VERTEX_ARRAY_BINDING);
        }
    }
}

impl<T: BufferTarget> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BufferTarget> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self::from_object(self.object.clone())
    }
}

impl<T: BufferTarget> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("target", &T::TYPE)
            .field("object", &self.object)
            .finish()
    }
}

impl<T: BufferTarget> Bindable for Buffer<T> {
    fn binding_point(&self) -> BindingPoint {
        T::TYPE.binding()
    }

    fn raw_name(&self) -> GLuint {
        self.name()
    }

    fn bind(&self) {
        Buffer::bind(self);
    }
}

/// A mapped range of a buffer's data store, viewed as elements of `E`.
///
/// The buffer is unmapped when the mapping is dropped. Unmapping acts on
/// whatever is bound to the target at that time, so keep the buffer bound
/// while the mapping is alive.
pub struct Mapping<'a, T: BufferTarget, E: Pod> {
    buffer: &'a Buffer<T>,
    ptr: *mut E,
    size: usize,
    readable: bool,
    writable: bool,
}

impl<'a, T: BufferTarget, E: Pod> Mapping<'a, T, E> {
    fn new(
        buffer: &'a Buffer<T>,
        ptr: *mut u8,
        size: usize,
        readable: bool,
        writable: bool,
    ) -> Result<Self> {
        if ptr.is_null() {
            return Err(anyhow!(
                "mapping {:?} buffer {} failed",
                T::TYPE,
                buffer.name()
            ));
        }
        let mapping = Self {
            buffer,
            ptr: ptr.cast(),
            size,
            readable,
            writable,
        };
        if !bytes::is_aligned::<E>(ptr) {
            // Dropping unmaps.
            bail!(
                "mapped pointer of buffer {} is not aligned for a {}-byte element",
                buffer.name(),
                size_of::<E>()
            );
        }
        Ok(mapping)
    }

    /// Size of the mapping in bytes.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of whole elements in the mapping.
    pub fn count(&self) -> usize {
        bytes::element_count::<E>(self.size)
    }

    pub fn buffer(&self) -> &Buffer<T> {
        self.buffer
    }

    /// The mapped elements, unless the mapping was created write-only.
    pub fn as_slice(&self) -> Option<&[E]> {
        self.readable
            .then(|| unsafe { std::slice::from_raw_parts(self.ptr, self.count()) })
    }

    /// The mapped elements, if the mapping was created writable.
    pub fn as_mut_slice(&mut self) -> Option<&mut [E]> {
        self.writable
            .then(|| unsafe { std::slice::from_raw_parts_mut(self.ptr, self.count()) })
    }
}

impl<T: BufferTarget, E: Pod> Drop for Mapping<'_, T, E> {
    fn drop(&mut self) {
        bind::check_for_default_binding(T::TYPE.binding());
        let target: GLenum = T::TYPE.into();
        let intact = crate::gl_call!(UnmapBuffer(target));
        if intact == gl::FALSE {
            tracing::warn!(
                buffer = self.buffer.name(),
                "buffer contents were corrupted while mapped"
            );
        }
    }
}

impl<T: BufferTarget, E: Pod> fmt::Debug for Mapping<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("buffer", &self.buffer.name())
            .field("size", &self.size)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .finish()
    }
}

/// A buffer bound to slot `INDEX` of an indexed target, e.g.
/// `UniformBuffer<2>` for `layout(binding = 2) uniform Block`.
///
/// Derefs to the plain [`Buffer`] for uploads and mappings.
pub struct IndexedBuffer<T: IndexedBufferTarget, const INDEX: u32> {
    buffer: Buffer<T>,
}

pub type UniformBuffer<const INDEX: u32> = IndexedBuffer<target::Uniform, INDEX>;
pub type TransformFeedbackBuffer<const INDEX: u32> = IndexedBuffer<target::TransformFeedback, INDEX>;
pub type ShaderStorageBuffer<const INDEX: u32> = IndexedBuffer<target::ShaderStorage, INDEX>;
pub type AtomicCounterBuffer<const INDEX: u32> = IndexedBuffer<target::AtomicCounter, INDEX>;

impl<T: IndexedBufferTarget, const INDEX: u32> IndexedBuffer<T, INDEX> {
    pub const SLOT: GLuint = INDEX;

    pub fn new() -> Self {
        Self {
            buffer: Buffer::new(),
        }
    }

    pub fn from_raw(name: GLuint) -> Self {
        Self {
            buffer: Buffer::from_raw(name),
        }
    }

    /// Binds the whole buffer to slot `INDEX` (and to the generic target).
    #[track_caller]
    pub fn bind_base(&self) {
        crate::gl_call!(BindBufferBase(T::INDEXED.into(), INDEX, self.buffer.name()));
    }

    /// Binds `size` bytes starting at `offset` to slot `INDEX`.
    #[track_caller]
    pub fn bind_range(&self, offset: usize, size: usize) {
        crate::gl_call!(BindBufferRange(
            T::INDEXED.into(),
            INDEX,
            self.buffer.name(),
            offset as GLintptr,
            size as GLsizeiptr
        ));
    }

    #[track_caller]
    pub fn unbind_base(&self) {
        crate::gl_call!(BindBufferBase(T::INDEXED.into(), INDEX, 0));
    }

    pub fn is_bound_indexed(&self) -> bool {
        bind::current_indexed_binding(T::INDEXED.binding(), INDEX) == self.buffer.name()
    }

    /// A non-owning handle to the buffer bound to slot `INDEX`.
    pub fn currently_bound_indexed() -> Self {
        Self::from_raw(bind::current_indexed_binding(T::INDEXED.binding(), INDEX))
    }
}

impl<T: IndexedBufferTarget, const INDEX: u32> Default for IndexedBuffer<T, INDEX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IndexedBufferTarget, const INDEX: u32> Clone for IndexedBuffer<T, INDEX> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
        }
    }
}

impl<T: IndexedBufferTarget, const INDEX: u32> fmt::Debug for IndexedBuffer<T, INDEX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedBuffer")
            .field("index", &INDEX)
            .field("buffer", &self.buffer)
            .finish()
    }
}

impl<T: IndexedBufferTarget, const INDEX: u32> Deref for IndexedBuffer<T, INDEX> {
    type Target = Buffer<T>;

    fn deref(&self) -> &Buffer<T> {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_of<T: BufferTarget>() -> GLenum {
        T::TYPE.into()
    }

    #[test]
    fn markers_map_to_their_targets() {
        assert_eq!(target_of::<target::Array>(), gl::ARRAY_BUFFER);
        assert_eq!(target_of::<target::ElementArray>(), gl::ELEMENT_ARRAY_BUFFER);
        assert_eq!(target_of::<target::Texture>(), gl::TEXTURE_BUFFER);
        assert_eq!(target_of::<target::DispatchIndirect>(), gl::DISPATCH_INDIRECT_BUFFER);
    }

    #[test]
    fn indexed_targets_share_the_generic_target() {
        fn check<T: IndexedBufferTarget>() {
            assert_eq!(T::INDEXED.as_buffer_type(), T::TYPE);
        }
        check::<target::Uniform>();
        check::<target::TransformFeedback>();
        check::<target::ShaderStorage>();
        check::<target::AtomicCounter>();
    }

    #[test]
    fn slot_index_is_part_of_the_type() {
        assert_eq!(UniformBuffer::<3>::SLOT, 3);
        assert_eq!(ShaderStorageBuffer::<0>::SLOT, 0);
    }

    #[test]
    fn mapping_checks_the_buffers_own_target() {
        let uniforms = UniformBuffer::<2>::from_raw(7);
        assert_eq!(uniforms.binding_point(), BufferType::Uniform.binding());
        assert_eq!(uniforms.raw_name(), 7);
        assert_eq!(IndexBuffer::from_raw(5).binding_point().query, gl::ELEMENT_ARRAY_BUFFER_BINDING);
    }

    #[test]
    fn non_owning_buffers_report_their_name() {
        let buffer = ArrayBuffer::from_raw(42);
        assert_eq!(buffer.name(), 42);
        assert_eq!(buffer.target(), BufferType::Array);
        assert_eq!(buffer.binding_point().name, "GL_ARRAY_BUFFER_BINDING");
        // Dropping a non-owning handle never reaches the driver.
        drop(buffer.clone());
    }
}
