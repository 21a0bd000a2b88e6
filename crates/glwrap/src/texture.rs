//! Texture objects.
//!
//! The target is part of the type. Upload functions exist only on targets
//! with the matching dimensionality: `upload_2d` on `Texture2D` and
//! `TextureRectangle`, `upload_3d` on `Texture3D` and `Texture2DArray`,
//! `upload_face` on `TextureCube`.

use std::fmt;
use std::marker::PhantomData;

use anyhow::Result;
use gl::types::{GLenum, GLfloat, GLint, GLsizei, GLuint};
use glwrap_core::enums::{
    BindingPoint, CompareFunc, CompareMode, CubeFace, DataType, MagFilter, MinFilter,
    PixelDataFormat, PixelDataInternalFormat, TextureType, WrapMode,
};
use glwrap_core::{Generate, Object, ObjectKind};

use crate::bind::{self, Bindable};
use crate::bytes::Pod;
use crate::capabilities::{require_loaded, Capabilities, Version};
use crate::error::GlwrapError;

/// `GL_TEXTURE_MAX_ANISOTROPY`, core in 4.6 and identical to the EXT value.
pub const TEXTURE_MAX_ANISOTROPY: GLenum = 0x84FE;
/// `GL_MAX_TEXTURE_MAX_ANISOTROPY`.
pub const MAX_TEXTURE_MAX_ANISOTROPY: GLenum = 0x84FF;

const ANISOTROPY_EXTENSIONS: [&str; 2] = [
    "GL_ARB_texture_filter_anisotropic",
    "GL_EXT_texture_filter_anisotropic",
];

pub enum TextureKind {}

impl ObjectKind for TextureKind {
    const NAME: &'static str = "texture";

    fn delete(name: GLuint) {
        crate::gl_call!(DeleteTextures(1, &name));
    }
}

impl Generate for TextureKind {
    fn generate() -> GLuint {
        let mut name = 0;
        crate::gl_call!(GenTextures(1, &mut name));
        name
    }
}

/// Element types of client-side pixel data.
pub trait PixelData: Pod {
    const TYPE: DataType;
}

macro_rules! impl_pixel_data {
    ($($ty:ty => $data:ident),* $(,)?) => {
        $(impl PixelData for $ty {
            const TYPE: DataType = DataType::$data;
        })*
    };
}

impl_pixel_data! {
    u8 => UnsignedByte,
    i8 => Byte,
    u16 => UnsignedShort,
    i16 => Short,
    u32 => UnsignedInt,
    i32 => Int,
    f32 => Float,
}

/// A texture binding target known at compile time.
pub trait TextureTarget: 'static {
    const TYPE: TextureType;

    /// The target passed to per-level queries.
    fn level_target() -> GLenum {
        Self::TYPE.into()
    }
}

/// Targets taking `glTexImage1D`.
pub trait Upload1D: TextureTarget {}
/// Targets taking `glTexImage2D` with their own target enum.
pub trait Upload2D: TextureTarget {}
/// Targets taking `glTexImage3D`.
pub trait Upload3D: TextureTarget {}
/// Targets taking `glTexStorage2D`.
pub trait Storage2D: TextureTarget {}

/// Marker types for the texture targets.
pub mod target {
    use super::{Storage2D, TextureTarget, Upload1D, Upload2D, Upload3D};
    use glwrap_core::enums::{CubeFace, TextureType};

    #[derive(Debug)]
    pub enum Texture1D {}
    #[derive(Debug)]
    pub enum Texture2D {}
    #[derive(Debug)]
    pub enum Texture3D {}
    #[derive(Debug)]
    pub enum Texture2DArray {}
    #[derive(Debug)]
    pub enum Rectangle {}
    #[derive(Debug)]
    pub enum CubeMap {}

    impl TextureTarget for Texture1D {
        const TYPE: TextureType = TextureType::Texture1D;
    }
    impl TextureTarget for Texture2D {
        const TYPE: TextureType = TextureType::Texture2D;
    }
    impl TextureTarget for Texture3D {
        const TYPE: TextureType = TextureType::Texture3D;
    }
    impl TextureTarget for Texture2DArray {
        const TYPE: TextureType = TextureType::Texture2DArray;
    }
    impl TextureTarget for Rectangle {
        const TYPE: TextureType = TextureType::TextureRectangle;
    }
    impl TextureTarget for CubeMap {
        const TYPE: TextureType = TextureType::TextureCubeMap;

        // Cube maps are queried per face; all faces share a size.
        fn level_target() -> gl::types::GLenum {
            CubeFace::PositiveX.into()
        }
    }

    impl Upload1D for Texture1D {}
    impl Upload2D for Texture2D {}
    impl Upload2D for Rectangle {}
    impl Upload3D for Texture3D {}
    impl Upload3D for Texture2DArray {}
    impl Storage2D for Texture2D {}
    impl Storage2D for Rectangle {}
    impl Storage2D for CubeMap {}
}

pub struct Texture<T: TextureTarget> {
    object: Object<TextureKind>,
    _target: PhantomData<T>,
}

pub type Texture1D = Texture<target::Texture1D>;
pub type Texture2D = Texture<target::Texture2D>;
pub type Texture3D = Texture<target::Texture3D>;
pub type Texture2DArray = Texture<target::Texture2DArray>;
pub type TextureRectangle = Texture<target::Rectangle>;
pub type TextureCube = Texture<target::CubeMap>;

fn pixels_ptr<E: PixelData>(data: &[E]) -> *const std::ffi::c_void {
    if data.is_empty() {
        std::ptr::null()
    } else {
        data.as_ptr().cast()
    }
}

/// Components per pixel of client data in `format`.
pub fn components(format: PixelDataFormat) -> usize {
    match format {
        PixelDataFormat::Red
        | PixelDataFormat::RedInteger
        | PixelDataFormat::DepthComponent
        | PixelDataFormat::StencilIndex => 1,
        // Depth-stencil data only comes in packed types, one element a pixel.
        PixelDataFormat::DepthStencil => 1,
        PixelDataFormat::Rg | PixelDataFormat::RgInteger => 2,
        PixelDataFormat::Rgb | PixelDataFormat::Bgr | PixelDataFormat::RgbInteger => 3,
        PixelDataFormat::Rgba | PixelDataFormat::Bgra | PixelDataFormat::RgbaInteger => 4,
    }
}

/// Bytes the driver reads for a `width` x `height` x `depth` image of
/// `element_size` byte components, with every row padded to `alignment`.
///
/// The last row is not padded.
pub fn upload_len(
    format: PixelDataFormat,
    element_size: usize,
    width: u32,
    height: u32,
    depth: u32,
    alignment: usize,
) -> usize {
    let row = width as usize * components(format) * element_size;
    let rows = height as usize * depth as usize;
    if row == 0 || rows == 0 {
        return 0;
    }
    let alignment = alignment.max(1);
    let stride = row.div_ceil(alignment) * alignment;
    stride * (rows - 1) + row
}

// An empty slice means "allocate only" and is never checked.
#[track_caller]
fn check_pixel_data<E: PixelData>(
    format: PixelDataFormat,
    width: u32,
    height: u32,
    depth: u32,
    data: &[E],
) -> Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    let alignment = match crate::context::get_integer(gl::UNPACK_ALIGNMENT) {
        value if value > 0 => value as usize,
        _ => 4,
    };
    let required = upload_len(format, std::mem::size_of::<E>(), width, height, depth, alignment);
    let provided = std::mem::size_of_val(data);
    if provided < required {
        return Err(GlwrapError::PixelDataTooShort { required, provided }.into());
    }
    Ok(())
}

impl<T: TextureTarget> Texture<T> {
    pub fn new() -> Self {
        Self::from_object(Object::new())
    }

    /// Wraps a texture created elsewhere without taking ownership of it.
    pub fn from_raw(name: GLuint) -> Self {
        Self::from_object(Object::from_raw(name))
    }

    fn from_object(object: Object<TextureKind>) -> Self {
        Self {
            object,
            _target: PhantomData,
        }
    }

    pub fn name(&self) -> GLuint {
        self.object.name()
    }

    /// Selects texture unit `unit` for the following binds.
    #[track_caller]
    pub fn active(unit: GLuint) {
        crate::gl_call!(ActiveTexture(gl::TEXTURE0 + unit));
    }

    /// Binds to this target of the active texture unit.
    #[track_caller]
    pub fn bind(&self) {
        crate::gl_call!(BindTexture(T::TYPE.into(), self.name()));
    }

    /// Binds to this target of texture unit `unit`, leaving it active.
    #[track_caller]
    pub fn bind_to_unit(&self, unit: GLuint) {
        Self::active(unit);
        crate::gl_call!(BindTexture(T::TYPE.into(), self.name()));
    }

    #[track_caller]
    pub fn unbind(&self) {
        crate::gl_call!(BindTexture(T::TYPE.into(), 0));
    }

    /// Whether this texture is bound to the active unit.
    pub fn is_bound(&self) -> bool {
        bind::current_binding(T::TYPE.binding()) == self.name()
    }

    pub fn currently_bound() -> Self {
        Self::from_raw(bind::current_binding(T::TYPE.binding()))
    }

    #[track_caller]
    pub fn generate_mipmap(&self) {
        bind::ensure_bound(self);
        crate::gl_call!(GenerateMipmap(T::TYPE.into()));
    }

    #[track_caller]
    pub fn min_filter(&self, filter: MinFilter) {
        self.parameter(gl::TEXTURE_MIN_FILTER, filter.into());
    }

    #[track_caller]
    pub fn mag_filter(&self, filter: MagFilter) {
        self.parameter(gl::TEXTURE_MAG_FILTER, filter.into());
    }

    #[track_caller]
    pub fn wrap_s(&self, mode: WrapMode) {
        self.parameter(gl::TEXTURE_WRAP_S, mode.into());
    }

    #[track_caller]
    pub fn wrap_t(&self, mode: WrapMode) {
        self.parameter(gl::TEXTURE_WRAP_T, mode.into());
    }

    #[track_caller]
    pub fn wrap_r(&self, mode: WrapMode) {
        self.parameter(gl::TEXTURE_WRAP_R, mode.into());
    }

    #[track_caller]
    pub fn compare_mode(&self, mode: CompareMode) {
        self.parameter(gl::TEXTURE_COMPARE_MODE, mode.into());
    }

    #[track_caller]
    pub fn compare_func(&self, func: CompareFunc) {
        self.parameter(gl::TEXTURE_COMPARE_FUNC, func.into());
    }

    /// Sets the maximum anisotropy, clamped to what the driver supports.
    #[track_caller]
    pub fn anisotropy(&self, capabilities: &Capabilities, value: f32) -> Result<()> {
        capabilities.require(
            "anisotropic filtering",
            Version::new(4, 6),
            &ANISOTROPY_EXTENSIONS,
        )?;
        bind::ensure_bound(self);
        let mut max: GLfloat = 1.0;
        crate::gl_call!(GetFloatv(MAX_TEXTURE_MAX_ANISOTROPY, &mut max));
        let value = value.clamp(1.0, max.max(1.0));
        crate::gl_call!(TexParameterf(T::TYPE.into(), TEXTURE_MAX_ANISOTROPY, value));
        Ok(())
    }

    /// Width of mipmap `level` in texels.
    #[track_caller]
    pub fn width(&self, level: GLint) -> u32 {
        self.level_parameter(level, gl::TEXTURE_WIDTH)
    }

    #[track_caller]
    pub fn height(&self, level: GLint) -> u32 {
        self.level_parameter(level, gl::TEXTURE_HEIGHT)
    }

    /// Depth of mipmap `level`; layer count for array textures.
    #[track_caller]
    pub fn depth(&self, level: GLint) -> u32 {
        self.level_parameter(level, gl::TEXTURE_DEPTH)
    }

    #[track_caller]
    fn parameter(&self, pname: GLenum, value: GLenum) {
        bind::ensure_bound(self);
        crate::gl_call!(TexParameteri(T::TYPE.into(), pname, value as GLint));
    }

    #[track_caller]
    fn level_parameter(&self, level: GLint, pname: GLenum) -> u32 {
        bind::ensure_bound(self);
        let mut value: GLint = 0;
        crate::gl_call!(GetTexLevelParameteriv(T::level_target(), level, pname, &mut value));
        value.max(0) as u32
    }
}

impl<T: Upload1D> Texture<T> {
    /// Uploads a one-dimensional image. An empty `data` allocates storage
    /// without initializing it.
    ///
    /// Fails with [`GlwrapError::PixelDataTooShort`] if `data` is smaller
    /// than the image.
    #[track_caller]
    pub fn upload_1d<E: PixelData>(
        &self,
        level: GLint,
        internal_format: PixelDataInternalFormat,
        width: u32,
        format: PixelDataFormat,
        data: &[E],
    ) -> Result<()> {
        check_pixel_data(format, width, 1, 1, data)?;
        bind::ensure_bound(self);
        crate::gl_call!(TexImage1D(
            T::TYPE.into(),
            level,
            GLenum::from(internal_format) as GLint,
            width as GLsizei,
            0,
            format.into(),
            E::TYPE.into(),
            pixels_ptr(data)
        ));
        Ok(())
    }
}

impl<T: Upload2D> Texture<T> {
    /// Uploads a two-dimensional image. An empty `data` allocates storage
    /// without initializing it.
    #[track_caller]
    pub fn upload_2d<E: PixelData>(
        &self,
        level: GLint,
        internal_format: PixelDataInternalFormat,
        width: u32,
        height: u32,
        format: PixelDataFormat,
        data: &[E],
    ) -> Result<()> {
        check_pixel_data(format, width, height, 1, data)?;
        bind::ensure_bound(self);
        crate::gl_call!(TexImage2D(
            T::TYPE.into(),
            level,
            GLenum::from(internal_format) as GLint,
            width as GLsizei,
            height as GLsizei,
            0,
            format.into(),
            E::TYPE.into(),
            pixels_ptr(data)
        ));
        Ok(())
    }

    /// Replaces a `width` x `height` region with its corner at `(x, y)`.
    #[track_caller]
    #[allow(clippy::too_many_arguments)]
    pub fn sub_upload_2d<E: PixelData>(
        &self,
        level: GLint,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        format: PixelDataFormat,
        data: &[E],
    ) -> Result<()> {
        check_pixel_data(format, width, height, 1, data)?;
        bind::ensure_bound(self);
        crate::gl_call!(TexSubImage2D(
            T::TYPE.into(),
            level,
            x,
            y,
            width as GLsizei,
            height as GLsizei,
            format.into(),
            E::TYPE.into(),
            pixels_ptr(data)
        ));
        Ok(())
    }
}

impl<T: Upload3D> Texture<T> {
    /// Uploads a three-dimensional image, or `depth` layers of an array.
    #[track_caller]
    #[allow(clippy::too_many_arguments)]
    pub fn upload_3d<E: PixelData>(
        &self,
        level: GLint,
        internal_format: PixelDataInternalFormat,
        width: u32,
        height: u32,
        depth: u32,
        format: PixelDataFormat,
        data: &[E],
    ) -> Result<()> {
        check_pixel_data(format, width, height, depth, data)?;
        bind::ensure_bound(self);
        crate::gl_call!(TexImage3D(
            T::TYPE.into(),
            level,
            GLenum::from(internal_format) as GLint,
            width as GLsizei,
            height as GLsizei,
            depth as GLsizei,
            0,
            format.into(),
            E::TYPE.into(),
            pixels_ptr(data)
        ));
        Ok(())
    }
}

impl<T: Storage2D> Texture<T> {
    /// Allocates immutable storage for `levels` mipmap levels (GL 4.2).
    #[track_caller]
    pub fn storage_2d(
        &self,
        levels: u32,
        internal_format: PixelDataInternalFormat,
        width: u32,
        height: u32,
    ) -> Result<()> {
        require_loaded("glTexStorage2D", gl::TexStorage2D::is_loaded())?;
        bind::ensure_bound(self);
        crate::gl_call!(TexStorage2D(
            T::TYPE.into(),
            levels as GLsizei,
            internal_format.into(),
            width as GLsizei,
            height as GLsizei
        ));
        Ok(())
    }
}

impl Texture<target::CubeMap> {
    /// Uploads the image of one cube face.
    #[track_caller]
    #[allow(clippy::too_many_arguments)]
    pub fn upload_face<E: PixelData>(
        &self,
        face: CubeFace,
        level: GLint,
        internal_format: PixelDataInternalFormat,
        width: u32,
        height: u32,
        format: PixelDataFormat,
        data: &[E],
    ) -> Result<()> {
        check_pixel_data(format, width, height, 1, data)?;
        bind::ensure_bound(self);
        crate::gl_call!(TexImage2D(
            face.into(),
            level,
            GLenum::from(internal_format) as GLint,
            width as GLsizei,
            height as GLsizei,
            0,
            format.into(),
            E::TYPE.into(),
            pixels_ptr(data)
        ));
        Ok(())
    }
}

impl<T: TextureTarget> Default for Texture<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextureTarget> Clone for Texture<T> {
    fn clone(&self) -> Self {
        Self::from_object(self.object.clone())
    }
}

impl<T: TextureTarget> fmt::Debug for Texture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("target", &T::TYPE)
            .field("object", &self.object)
            .finish()
    }
}

impl<T: TextureTarget> Bindable for Texture<T> {
    fn binding_point(&self) -> BindingPoint {
        T::TYPE.binding()
    }

    fn raw_name(&self) -> GLuint {
        self.name()
    }

    fn bind(&self) {
        Texture::bind(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_types_match_their_gl_enums() {
        assert_eq!(GLenum::from(<u8 as PixelData>::TYPE), gl::UNSIGNED_BYTE);
        assert_eq!(GLenum::from(<f32 as PixelData>::TYPE), gl::FLOAT);
        assert_eq!(GLenum::from(<i16 as PixelData>::TYPE), gl::SHORT);
    }

    #[test]
    fn cube_maps_query_levels_through_a_face() {
        assert_eq!(target::CubeMap::level_target(), gl::TEXTURE_CUBE_MAP_POSITIVE_X);
        assert_eq!(target::Texture2D::level_target(), gl::TEXTURE_2D);
    }

    #[test]
    fn anisotropy_needs_gl46_or_an_extension() {
        let texture = Texture2D::from_raw(1);
        let caps = Capabilities::from_parts(Version::new(3, 3), Vec::<String>::new());
        let err = texture.anisotropy(&caps, 8.0).unwrap_err();
        assert!(err.to_string().contains("anisotropic filtering"));
    }

    #[test]
    fn empty_uploads_pass_a_null_pointer() {
        assert!(pixels_ptr::<u8>(&[]).is_null());
        assert!(!pixels_ptr(&[0u8; 4]).is_null());
    }

    #[test]
    fn full_images_need_every_texel() {
        assert_eq!(upload_len(PixelDataFormat::Rgba, 1, 1024, 1024, 1, 4), 4 * 1024 * 1024);
        assert_eq!(upload_len(PixelDataFormat::Red, 4, 16, 1, 1, 4), 64);
        assert_eq!(upload_len(PixelDataFormat::Rgb, 2, 2, 2, 3, 1), 2 * 3 * 2 * 2 * 3);
    }

    #[test]
    fn rows_are_padded_to_the_unpack_alignment() {
        // 3x2 RGB bytes: 9 byte rows padded to 12, the last one unpadded.
        assert_eq!(upload_len(PixelDataFormat::Rgb, 1, 3, 2, 1, 4), 12 + 9);
        assert_eq!(upload_len(PixelDataFormat::Rgb, 1, 3, 2, 1, 1), 18);
        assert_eq!(upload_len(PixelDataFormat::Bgr, 1, 3, 2, 1, 0), 18);
    }

    #[test]
    fn zero_sized_images_read_nothing() {
        assert_eq!(upload_len(PixelDataFormat::Rgba, 4, 0, 64, 1, 4), 0);
        assert_eq!(upload_len(PixelDataFormat::Rgba, 4, 64, 64, 0, 4), 0);
    }

    #[test]
    fn component_counts_follow_the_format() {
        assert_eq!(components(PixelDataFormat::RedInteger), 1);
        assert_eq!(components(PixelDataFormat::Rg), 2);
        assert_eq!(components(PixelDataFormat::Bgr), 3);
        assert_eq!(components(PixelDataFormat::RgbaInteger), 4);
    }

    #[test]
    fn short_pixel_data_is_rejected_before_the_driver_sees_it() {
        let err: anyhow::Error = GlwrapError::PixelDataTooShort {
            required: 4 * 1024 * 1024,
            provided: 4,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "pixel data holds 4 bytes but the upload reads 4194304"
        );
        assert!(matches!(
            err.downcast_ref::<GlwrapError>(),
            Some(GlwrapError::PixelDataTooShort { provided: 4, .. })
        ));
    }

    #[test]
    fn empty_data_allocates_without_a_length_check() {
        assert!(check_pixel_data::<u8>(PixelDataFormat::Rgba, 1024, 1024, 1, &[]).is_ok());
    }

    #[test]
    fn aliases_carry_their_binding_points() {
        assert_eq!(
            TextureCube::from_raw(3).binding_point().name,
            "GL_TEXTURE_BINDING_CUBE_MAP"
        );
        assert_eq!(
            TextureRectangle::from_raw(3).binding_point().query,
            gl::TEXTURE_BINDING_RECTANGLE
        );
    }
}
