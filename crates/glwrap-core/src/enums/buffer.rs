use super::{gl_enum, BindingPoint};
use crate::bitfield::gl_bits;

gl_enum! {
    /// Non-indexed buffer binding targets.
    pub enum BufferType {
        Array = gl::ARRAY_BUFFER,
        AtomicCounter = gl::ATOMIC_COUNTER_BUFFER,
        CopyRead = gl::COPY_READ_BUFFER,
        CopyWrite = gl::COPY_WRITE_BUFFER,
        DispatchIndirect = gl::DISPATCH_INDIRECT_BUFFER,
        DrawIndirect = gl::DRAW_INDIRECT_BUFFER,
        ElementArray = gl::ELEMENT_ARRAY_BUFFER,
        PixelPack = gl::PIXEL_PACK_BUFFER,
        PixelUnpack = gl::PIXEL_UNPACK_BUFFER,
        ShaderStorage = gl::SHADER_STORAGE_BUFFER,
        Texture = gl::TEXTURE_BUFFER,
        TransformFeedback = gl::TRANSFORM_FEEDBACK_BUFFER,
        Uniform = gl::UNIFORM_BUFFER,
    }
}

impl BufferType {
    /// The query enum of this target's binding point.
    pub fn binding(self) -> BindingPoint {
        match self {
            BufferType::Array => {
                BindingPoint::new(gl::ARRAY_BUFFER_BINDING, "GL_ARRAY_BUFFER_BINDING")
            }
            BufferType::AtomicCounter => BindingPoint::new(
                gl::ATOMIC_COUNTER_BUFFER_BINDING,
                "GL_ATOMIC_COUNTER_BUFFER_BINDING",
            ),
            // The copy targets are their own binding points.
            BufferType::CopyRead => BindingPoint::new(gl::COPY_READ_BUFFER, "GL_COPY_READ_BUFFER"),
            BufferType::CopyWrite => {
                BindingPoint::new(gl::COPY_WRITE_BUFFER, "GL_COPY_WRITE_BUFFER")
            }
            BufferType::DispatchIndirect => BindingPoint::new(
                gl::DISPATCH_INDIRECT_BUFFER_BINDING,
                "GL_DISPATCH_INDIRECT_BUFFER_BINDING",
            ),
            BufferType::DrawIndirect => BindingPoint::new(
                gl::DRAW_INDIRECT_BUFFER_BINDING,
                "GL_DRAW_INDIRECT_BUFFER_BINDING",
            ),
            BufferType::ElementArray => BindingPoint::new(
                gl::ELEMENT_ARRAY_BUFFER_BINDING,
                "GL_ELEMENT_ARRAY_BUFFER_BINDING",
            ),
            BufferType::PixelPack => BindingPoint::new(
                gl::PIXEL_PACK_BUFFER_BINDING,
                "GL_PIXEL_PACK_BUFFER_BINDING",
            ),
            BufferType::PixelUnpack => BindingPoint::new(
                gl::PIXEL_UNPACK_BUFFER_BINDING,
                "GL_PIXEL_UNPACK_BUFFER_BINDING",
            ),
            BufferType::ShaderStorage => BindingPoint::new(
                gl::SHADER_STORAGE_BUFFER_BINDING,
                "GL_SHADER_STORAGE_BUFFER_BINDING",
            ),
            // Not a typo: BINDING_BUFFER, not BUFFER_BINDING.
            BufferType::Texture => {
                BindingPoint::new(gl::TEXTURE_BINDING_BUFFER, "GL_TEXTURE_BINDING_BUFFER")
            }
            BufferType::TransformFeedback => BindingPoint::new(
                gl::TRANSFORM_FEEDBACK_BUFFER_BINDING,
                "GL_TRANSFORM_FEEDBACK_BUFFER_BINDING",
            ),
            BufferType::Uniform => {
                BindingPoint::new(gl::UNIFORM_BUFFER_BINDING, "GL_UNIFORM_BUFFER_BINDING")
            }
        }
    }
}

gl_enum! {
    /// Buffer targets that have an array of binding points.
    pub enum IndexedBufferType {
        AtomicCounter = gl::ATOMIC_COUNTER_BUFFER,
        ShaderStorage = gl::SHADER_STORAGE_BUFFER,
        TransformFeedback = gl::TRANSFORM_FEEDBACK_BUFFER,
        Uniform = gl::UNIFORM_BUFFER,
    }
}

impl IndexedBufferType {
    /// The indexed query enum, used with `glGetIntegeri_v`.
    pub fn binding(self) -> BindingPoint {
        self.as_buffer_type().binding()
    }

    pub fn as_buffer_type(self) -> BufferType {
        match self {
            IndexedBufferType::AtomicCounter => BufferType::AtomicCounter,
            IndexedBufferType::ShaderStorage => BufferType::ShaderStorage,
            IndexedBufferType::TransformFeedback => BufferType::TransformFeedback,
            IndexedBufferType::Uniform => BufferType::Uniform,
        }
    }
}

gl_enum! {
    pub enum BufferUsage {
        StreamDraw = gl::STREAM_DRAW,
        StreamRead = gl::STREAM_READ,
        StreamCopy = gl::STREAM_COPY,
        StaticDraw = gl::STATIC_DRAW,
        StaticRead = gl::STATIC_READ,
        StaticCopy = gl::STATIC_COPY,
        DynamicDraw = gl::DYNAMIC_DRAW,
        DynamicRead = gl::DYNAMIC_READ,
        DynamicCopy = gl::DYNAMIC_COPY,
    }
}

gl_enum! {
    /// Access policy of a whole-buffer `glMapBuffer`.
    pub enum BufferMapAccess {
        ReadOnly = gl::READ_ONLY,
        WriteOnly = gl::WRITE_ONLY,
        ReadWrite = gl::READ_WRITE,
    }
}

gl_bits! {
    /// Access flags of `glMapBufferRange`.
    pub enum BufferMapAccessFlags {
        MapRead = gl::MAP_READ_BIT,
        MapWrite = gl::MAP_WRITE_BIT,
        MapInvalidateRange = gl::MAP_INVALIDATE_RANGE_BIT,
        MapInvalidateBuffer = gl::MAP_INVALIDATE_BUFFER_BIT,
        MapFlushExplicit = gl::MAP_FLUSH_EXPLICIT_BIT,
        MapUnsynchronized = gl::MAP_UNSYNCHRONIZED_BIT,
        MapPersistent = gl::MAP_PERSISTENT_BIT,
        MapCoherent = gl::MAP_COHERENT_BIT,
    }
}

gl_bits! {
    /// Flags of immutable storage allocated with `glBufferStorage`.
    pub enum BufferStorageBit {
        MapRead = gl::MAP_READ_BIT,
        MapWrite = gl::MAP_WRITE_BIT,
        MapPersistent = gl::MAP_PERSISTENT_BIT,
        MapCoherent = gl::MAP_COHERENT_BIT,
        DynamicStorage = gl::DYNAMIC_STORAGE_BIT,
        ClientStorage = gl::CLIENT_STORAGE_BIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_points_follow_the_target() {
        let point = BufferType::ElementArray.binding();
        assert_eq!(point.query, gl::ELEMENT_ARRAY_BUFFER_BINDING);
        assert_eq!(point.name, "GL_ELEMENT_ARRAY_BUFFER_BINDING");

        assert_eq!(
            IndexedBufferType::Uniform.binding(),
            BufferType::Uniform.binding()
        );
    }

    #[test]
    fn raw_values_convert_back() {
        assert_eq!(
            BufferUsage::from_raw(gl::DYNAMIC_DRAW),
            Some(BufferUsage::DynamicDraw)
        );
        assert_eq!(BufferUsage::from_raw(gl::TRIANGLES), None);
        assert_eq!(gl::types::GLenum::from(BufferType::Array), gl::ARRAY_BUFFER);
    }
}
