use super::{gl_enum, BindingPoint};

gl_enum! {
    /// Texture binding targets.
    pub enum TextureType {
        Texture1D = gl::TEXTURE_1D,
        Texture2D = gl::TEXTURE_2D,
        Texture3D = gl::TEXTURE_3D,
        Texture1DArray = gl::TEXTURE_1D_ARRAY,
        Texture2DArray = gl::TEXTURE_2D_ARRAY,
        TextureRectangle = gl::TEXTURE_RECTANGLE,
        TextureCubeMap = gl::TEXTURE_CUBE_MAP,
        TextureCubeMapArray = gl::TEXTURE_CUBE_MAP_ARRAY,
        TextureBuffer = gl::TEXTURE_BUFFER,
        Texture2DMultisample = gl::TEXTURE_2D_MULTISAMPLE,
    }
}

impl TextureType {
    pub fn binding(self) -> BindingPoint {
        match self {
            TextureType::Texture1D => BindingPoint::new(gl::TEXTURE_BINDING_1D, "GL_TEXTURE_BINDING_1D"),
            TextureType::Texture2D => BindingPoint::new(gl::TEXTURE_BINDING_2D, "GL_TEXTURE_BINDING_2D"),
            TextureType::Texture3D => BindingPoint::new(gl::TEXTURE_BINDING_3D, "GL_TEXTURE_BINDING_3D"),
            TextureType::Texture1DArray => {
                BindingPoint::new(gl::TEXTURE_BINDING_1D_ARRAY, "GL_TEXTURE_BINDING_1D_ARRAY")
            }
            TextureType::Texture2DArray => {
                BindingPoint::new(gl::TEXTURE_BINDING_2D_ARRAY, "GL_TEXTURE_BINDING_2D_ARRAY")
            }
            TextureType::TextureRectangle => {
                BindingPoint::new(gl::TEXTURE_BINDING_RECTANGLE, "GL_TEXTURE_BINDING_RECTANGLE")
            }
            TextureType::TextureCubeMap => {
                BindingPoint::new(gl::TEXTURE_BINDING_CUBE_MAP, "GL_TEXTURE_BINDING_CUBE_MAP")
            }
            TextureType::TextureCubeMapArray => BindingPoint::new(
                gl::TEXTURE_BINDING_CUBE_MAP_ARRAY,
                "GL_TEXTURE_BINDING_CUBE_MAP_ARRAY",
            ),
            TextureType::TextureBuffer => {
                BindingPoint::new(gl::TEXTURE_BINDING_BUFFER, "GL_TEXTURE_BINDING_BUFFER")
            }
            TextureType::Texture2DMultisample => BindingPoint::new(
                gl::TEXTURE_BINDING_2D_MULTISAMPLE,
                "GL_TEXTURE_BINDING_2D_MULTISAMPLE",
            ),
        }
    }
}

gl_enum! {
    /// The six faces of a cube map, in the order GL numbers them.
    pub enum CubeFace {
        PositiveX = gl::TEXTURE_CUBE_MAP_POSITIVE_X,
        NegativeX = gl::TEXTURE_CUBE_MAP_NEGATIVE_X,
        PositiveY = gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
        NegativeY = gl::TEXTURE_CUBE_MAP_NEGATIVE_Y,
        PositiveZ = gl::TEXTURE_CUBE_MAP_POSITIVE_Z,
        NegativeZ = gl::TEXTURE_CUBE_MAP_NEGATIVE_Z,
    }
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];
}

gl_enum! {
    pub enum MinFilter {
        Nearest = gl::NEAREST,
        Linear = gl::LINEAR,
        NearestMipmapNearest = gl::NEAREST_MIPMAP_NEAREST,
        LinearMipmapNearest = gl::LINEAR_MIPMAP_NEAREST,
        NearestMipmapLinear = gl::NEAREST_MIPMAP_LINEAR,
        LinearMipmapLinear = gl::LINEAR_MIPMAP_LINEAR,
    }
}

gl_enum! {
    pub enum MagFilter {
        Nearest = gl::NEAREST,
        Linear = gl::LINEAR,
    }
}

gl_enum! {
    pub enum WrapMode {
        ClampToEdge = gl::CLAMP_TO_EDGE,
        ClampToBorder = gl::CLAMP_TO_BORDER,
        MirroredRepeat = gl::MIRRORED_REPEAT,
        Repeat = gl::REPEAT,
        MirrorClampToEdge = gl::MIRROR_CLAMP_TO_EDGE,
    }
}

gl_enum! {
    pub enum CompareMode {
        Disabled = gl::NONE,
        CompareRefToTexture = gl::COMPARE_REF_TO_TEXTURE,
    }
}

gl_enum! {
    /// Client-side layout of pixel data passed to uploads.
    pub enum PixelDataFormat {
        Red = gl::RED,
        Rg = gl::RG,
        Rgb = gl::RGB,
        Bgr = gl::BGR,
        Rgba = gl::RGBA,
        Bgra = gl::BGRA,
        RedInteger = gl::RED_INTEGER,
        RgInteger = gl::RG_INTEGER,
        RgbInteger = gl::RGB_INTEGER,
        RgbaInteger = gl::RGBA_INTEGER,
        DepthComponent = gl::DEPTH_COMPONENT,
        StencilIndex = gl::STENCIL_INDEX,
        DepthStencil = gl::DEPTH_STENCIL,
    }
}

gl_enum! {
    /// Server-side storage format of textures and renderbuffers.
    pub enum PixelDataInternalFormat {
        Red = gl::RED,
        Rg = gl::RG,
        Rgb = gl::RGB,
        Rgba = gl::RGBA,
        DepthComponent = gl::DEPTH_COMPONENT,
        DepthStencil = gl::DEPTH_STENCIL,
        R8 = gl::R8,
        Rg8 = gl::RG8,
        Rgb8 = gl::RGB8,
        Rgba8 = gl::RGBA8,
        Srgb8 = gl::SRGB8,
        Srgb8Alpha8 = gl::SRGB8_ALPHA8,
        R16F = gl::R16F,
        Rg16F = gl::RG16F,
        Rgb16F = gl::RGB16F,
        Rgba16F = gl::RGBA16F,
        R32F = gl::R32F,
        Rg32F = gl::RG32F,
        Rgb32F = gl::RGB32F,
        Rgba32F = gl::RGBA32F,
        R32I = gl::R32I,
        R32UI = gl::R32UI,
        R11FG11FB10F = gl::R11F_G11F_B10F,
        DepthComponent16 = gl::DEPTH_COMPONENT16,
        DepthComponent24 = gl::DEPTH_COMPONENT24,
        DepthComponent32F = gl::DEPTH_COMPONENT32F,
        Depth24Stencil8 = gl::DEPTH24_STENCIL8,
        StencilIndex8 = gl::STENCIL_INDEX8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_faces_are_consecutive() {
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(
                gl::types::GLenum::from(*face),
                gl::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32
            );
        }
    }

    #[test]
    fn texture_binding_names() {
        assert_eq!(TextureType::Texture2D.binding().name, "GL_TEXTURE_BINDING_2D");
        assert_eq!(
            TextureType::TextureCubeMap.binding().query,
            gl::TEXTURE_BINDING_CUBE_MAP
        );
    }
}
