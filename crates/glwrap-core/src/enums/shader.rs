use super::gl_enum;

gl_enum! {
    pub enum ShaderType {
        Vertex = gl::VERTEX_SHADER,
        TessControl = gl::TESS_CONTROL_SHADER,
        TessEvaluation = gl::TESS_EVALUATION_SHADER,
        Geometry = gl::GEOMETRY_SHADER,
        Fragment = gl::FRAGMENT_SHADER,
        Compute = gl::COMPUTE_SHADER,
    }
}

impl ShaderType {
    /// Short stage name used when a shader has no file name.
    pub fn stage_name(self) -> &'static str {
        match self {
            ShaderType::Vertex => "vertex",
            ShaderType::TessControl => "tessellation control",
            ShaderType::TessEvaluation => "tessellation evaluation",
            ShaderType::Geometry => "geometry",
            ShaderType::Fragment => "fragment",
            ShaderType::Compute => "compute",
        }
    }
}

gl_enum! {
    /// How captured varyings are laid out in transform feedback buffers.
    pub enum TransformFeedbackBufferMode {
        InterleavedAttribs = gl::INTERLEAVED_ATTRIBS,
        SeparateAttribs = gl::SEPARATE_ATTRIBS,
    }
}
