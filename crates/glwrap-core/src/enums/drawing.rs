use super::gl_enum;
use crate::bitfield::gl_bits;

gl_enum! {
    pub enum PrimitiveType {
        Points = gl::POINTS,
        LineStrip = gl::LINE_STRIP,
        LineLoop = gl::LINE_LOOP,
        Lines = gl::LINES,
        LineStripAdjacency = gl::LINE_STRIP_ADJACENCY,
        LinesAdjacency = gl::LINES_ADJACENCY,
        TriangleStrip = gl::TRIANGLE_STRIP,
        TriangleFan = gl::TRIANGLE_FAN,
        Triangles = gl::TRIANGLES,
        TriangleStripAdjacency = gl::TRIANGLE_STRIP_ADJACENCY,
        TrianglesAdjacency = gl::TRIANGLES_ADJACENCY,
        Patches = gl::PATCHES,
    }
}

gl_enum! {
    /// Primitive modes accepted by `glBeginTransformFeedback`.
    pub enum TransformFeedbackPrimitiveType {
        Points = gl::POINTS,
        Lines = gl::LINES,
        Triangles = gl::TRIANGLES,
    }
}

gl_enum! {
    /// Element types of index buffers.
    pub enum IndexType {
        UnsignedByte = gl::UNSIGNED_BYTE,
        UnsignedShort = gl::UNSIGNED_SHORT,
        UnsignedInt = gl::UNSIGNED_INT,
    }
}

impl IndexType {
    /// Size of one index in bytes.
    pub fn size(self) -> usize {
        match self {
            IndexType::UnsignedByte => 1,
            IndexType::UnsignedShort => 2,
            IndexType::UnsignedInt => 4,
        }
    }
}

gl_enum! {
    /// Component types of vertex attributes and pixel transfers.
    pub enum DataType {
        Byte = gl::BYTE,
        UnsignedByte = gl::UNSIGNED_BYTE,
        Short = gl::SHORT,
        UnsignedShort = gl::UNSIGNED_SHORT,
        Int = gl::INT,
        UnsignedInt = gl::UNSIGNED_INT,
        HalfFloat = gl::HALF_FLOAT,
        Float = gl::FLOAT,
        Double = gl::DOUBLE,
        Fixed = gl::FIXED,
        Int2_10_10_10Rev = gl::INT_2_10_10_10_REV,
        UnsignedInt2_10_10_10Rev = gl::UNSIGNED_INT_2_10_10_10_REV,
        UnsignedInt10F11F11FRev = gl::UNSIGNED_INT_10F_11F_11F_REV,
        UnsignedInt24_8 = gl::UNSIGNED_INT_24_8,
        Float32UnsignedInt24_8Rev = gl::FLOAT_32_UNSIGNED_INT_24_8_REV,
    }
}

gl_enum! {
    /// Server-side capabilities toggled with `glEnable` / `glDisable`.
    pub enum Capability {
        Blend = gl::BLEND,
        ColorLogicOp = gl::COLOR_LOGIC_OP,
        CullFace = gl::CULL_FACE,
        DebugOutput = gl::DEBUG_OUTPUT,
        DebugOutputSynchronous = gl::DEBUG_OUTPUT_SYNCHRONOUS,
        DepthClamp = gl::DEPTH_CLAMP,
        DepthTest = gl::DEPTH_TEST,
        Dither = gl::DITHER,
        FramebufferSrgb = gl::FRAMEBUFFER_SRGB,
        LineSmooth = gl::LINE_SMOOTH,
        Multisample = gl::MULTISAMPLE,
        PolygonOffsetFill = gl::POLYGON_OFFSET_FILL,
        PolygonSmooth = gl::POLYGON_SMOOTH,
        PrimitiveRestart = gl::PRIMITIVE_RESTART,
        ProgramPointSize = gl::PROGRAM_POINT_SIZE,
        RasterizerDiscard = gl::RASTERIZER_DISCARD,
        SampleAlphaToCoverage = gl::SAMPLE_ALPHA_TO_COVERAGE,
        ScissorTest = gl::SCISSOR_TEST,
        StencilTest = gl::STENCIL_TEST,
        TextureCubeMapSeamless = gl::TEXTURE_CUBE_MAP_SEAMLESS,
    }
}

gl_enum! {
    pub enum BlendFunction {
        Zero = gl::ZERO,
        One = gl::ONE,
        SrcColor = gl::SRC_COLOR,
        OneMinusSrcColor = gl::ONE_MINUS_SRC_COLOR,
        DstColor = gl::DST_COLOR,
        OneMinusDstColor = gl::ONE_MINUS_DST_COLOR,
        SrcAlpha = gl::SRC_ALPHA,
        OneMinusSrcAlpha = gl::ONE_MINUS_SRC_ALPHA,
        DstAlpha = gl::DST_ALPHA,
        OneMinusDstAlpha = gl::ONE_MINUS_DST_ALPHA,
        ConstantColor = gl::CONSTANT_COLOR,
        OneMinusConstantColor = gl::ONE_MINUS_CONSTANT_COLOR,
        ConstantAlpha = gl::CONSTANT_ALPHA,
        OneMinusConstantAlpha = gl::ONE_MINUS_CONSTANT_ALPHA,
        SrcAlphaSaturate = gl::SRC_ALPHA_SATURATE,
    }
}

gl_enum! {
    pub enum BlendEquation {
        FuncAdd = gl::FUNC_ADD,
        FuncSubtract = gl::FUNC_SUBTRACT,
        FuncReverseSubtract = gl::FUNC_REVERSE_SUBTRACT,
        Min = gl::MIN,
        Max = gl::MAX,
    }
}

gl_enum! {
    /// Comparison used by depth tests and depth texture lookups.
    pub enum CompareFunc {
        Never = gl::NEVER,
        Less = gl::LESS,
        Equal = gl::EQUAL,
        LEqual = gl::LEQUAL,
        Greater = gl::GREATER,
        NotEqual = gl::NOTEQUAL,
        GEqual = gl::GEQUAL,
        Always = gl::ALWAYS,
    }
}

gl_enum! {
    pub enum Face {
        Front = gl::FRONT,
        Back = gl::BACK,
        FrontAndBack = gl::FRONT_AND_BACK,
    }
}

gl_enum! {
    pub enum FaceOrientation {
        Cw = gl::CW,
        Ccw = gl::CCW,
    }
}

gl_enum! {
    pub enum PolyMode {
        Point = gl::POINT,
        Line = gl::LINE,
        Fill = gl::FILL,
    }
}

gl_enum! {
    /// Strings readable with `glGetString`.
    pub enum StringName {
        Vendor = gl::VENDOR,
        Renderer = gl::RENDERER,
        Version = gl::VERSION,
        ShadingLanguageVersion = gl::SHADING_LANGUAGE_VERSION,
    }
}

gl_bits! {
    /// Buffers selected by `glClear` and `glBlitFramebuffer`.
    pub enum BufferSelectBit {
        Color = gl::COLOR_BUFFER_BIT,
        Depth = gl::DEPTH_BUFFER_BIT,
        Stencil = gl::STENCIL_BUFFER_BIT,
    }
}

gl_bits! {
    pub enum MemoryBarrierBit {
        VertexAttribArray = gl::VERTEX_ATTRIB_ARRAY_BARRIER_BIT,
        ElementArray = gl::ELEMENT_ARRAY_BARRIER_BIT,
        Uniform = gl::UNIFORM_BARRIER_BIT,
        TextureFetch = gl::TEXTURE_FETCH_BARRIER_BIT,
        ShaderImageAccess = gl::SHADER_IMAGE_ACCESS_BARRIER_BIT,
        Command = gl::COMMAND_BARRIER_BIT,
        PixelBuffer = gl::PIXEL_BUFFER_BARRIER_BIT,
        TextureUpdate = gl::TEXTURE_UPDATE_BARRIER_BIT,
        BufferUpdate = gl::BUFFER_UPDATE_BARRIER_BIT,
        Framebuffer = gl::FRAMEBUFFER_BARRIER_BIT,
        TransformFeedback = gl::TRANSFORM_FEEDBACK_BARRIER_BIT,
        AtomicCounter = gl::ATOMIC_COUNTER_BARRIER_BIT,
        ShaderStorage = gl::SHADER_STORAGE_BARRIER_BIT,
        All = gl::ALL_BARRIER_BITS,
    }
}
