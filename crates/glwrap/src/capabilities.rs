//! What the current context can do.
//!
//! Queried once after loading. Wrappers whose entry point might be absent
//! check `is_loaded()` on it directly; features that depend on a version or
//! an extension go through [`Capabilities::require`].

use std::collections::HashSet;
use std::ffi::CStr;
use std::fmt;

use anyhow::{anyhow, Result};
use gl::types::{GLint, GLuint};
use glwrap_core::enums::StringName;

use crate::error::GlwrapError;

/// A `major.minor` version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parses the version out of `GL_VERSION` or `GL_SHADING_LANGUAGE_VERSION`.
///
/// Accepts vendor suffixes and the ES prefix: `"4.6.0 NVIDIA 535.54"`,
/// `"OpenGL ES 3.2 Mesa 23.1"`, `"4.60 NVIDIA"`.
pub fn parse_version(text: &str) -> Option<Version> {
    let token = text
        .split_whitespace()
        .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))?;
    let mut parts = token.split('.');
    let major = leading_number(parts.next()?)?;
    let minor = parts.next().map(minor_number).unwrap_or(0);
    Some(Version::new(major, minor))
}

// GLSL writes the minor version in hundredths: "4.60" is 4.6, "4.10" is 4.1.
fn minor_number(part: &str) -> u32 {
    let digits = part
        .find(|c: char| !c.is_ascii_digit())
        .map_or(part, |end| &part[..end]);
    match digits.as_bytes() {
        [] => 0,
        [first, ..] => u32::from(first - b'0'),
    }
}

fn leading_number(part: &str) -> Option<u32> {
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].parse().ok()
}

#[derive(Debug, Clone)]
pub struct Capabilities {
    pub version: Version,
    pub shading_language: Option<Version>,
    pub vendor: String,
    pub renderer: String,
    extensions: HashSet<String>,
}

impl Capabilities {
    /// Queries the current context.
    pub fn query() -> Result<Self> {
        if !crate::loader::is_loaded() {
            return Err(anyhow!("OpenGL function pointers are not loaded"));
        }

        let version_text = crate::context::get_string(StringName::Version)
            .ok_or_else(|| anyhow!("glGetString(GL_VERSION) returned null; is a context current?"))?;
        let version = parse_version(&version_text)
            .ok_or_else(|| anyhow!("unrecognised GL_VERSION string {version_text:?}"))?;
        let shading_language = crate::context::get_string(StringName::ShadingLanguageVersion)
            .as_deref()
            .and_then(parse_version);

        let capabilities = Self {
            version,
            shading_language,
            vendor: crate::context::get_string(StringName::Vendor).unwrap_or_default(),
            renderer: crate::context::get_string(StringName::Renderer).unwrap_or_default(),
            extensions: query_extensions(),
        };
        tracing::info!(
            version = %capabilities.version,
            renderer = %capabilities.renderer,
            extensions = capabilities.extensions.len(),
            "queried OpenGL capabilities"
        );
        Ok(capabilities)
    }

    /// Capabilities of a context with the given version and extensions.
    pub fn from_parts<I, S>(version: Version, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            version,
            shading_language: None,
            vendor: String::new(),
            renderer: String::new(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        self.version >= Version::new(major, minor)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    /// Fails with [`GlwrapError::Unsupported`] unless the context is at
    /// least `version` or advertises one of `extensions`.
    pub fn require(&self, feature: &'static str, version: Version, extensions: &[&str]) -> Result<()> {
        if self.version >= version || extensions.iter().any(|ext| self.has_extension(ext)) {
            Ok(())
        } else {
            Err(GlwrapError::Unsupported { feature }.into())
        }
    }
}

/// Fails with [`GlwrapError::Unsupported`] if an entry point was not loaded.
pub fn require_loaded(feature: &'static str, loaded: bool) -> Result<()> {
    if loaded {
        Ok(())
    } else {
        Err(GlwrapError::Unsupported { feature }.into())
    }
}

fn query_extensions() -> HashSet<String> {
    if !gl::GetStringi::is_loaded() {
        return HashSet::new();
    }
    let count = crate::context::get_integer(gl::NUM_EXTENSIONS).max(0) as GLuint;
    (0..count)
        .filter_map(|index| {
            let ptr = crate::gl_call!(GetStringi(gl::EXTENSIONS, index));
            if ptr.is_null() {
                return None;
            }
            let name = unsafe { CStr::from_ptr(ptr.cast()) };
            Some(name.to_string_lossy().into_owned())
        })
        .collect()
}

/// Reads a single `GLint` limit, e.g. `GL_MAX_TEXTURE_IMAGE_UNITS`.
pub fn limit(pname: gl::types::GLenum) -> GLint {
    crate::context::get_integer(pname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_desktop_version_strings() {
        assert_eq!(parse_version("4.6.0 NVIDIA 535.54.03"), Some(Version::new(4, 6)));
        assert_eq!(parse_version("3.3 (Core Profile) Mesa 23.1.4"), Some(Version::new(3, 3)));
        assert_eq!(parse_version("4.1 ATI-4.14.1"), Some(Version::new(4, 1)));
    }

    #[test]
    fn parses_es_and_glsl_strings() {
        assert_eq!(parse_version("OpenGL ES 3.2 Mesa 23.1"), Some(Version::new(3, 2)));
        assert_eq!(parse_version("4.60 NVIDIA"), Some(Version::new(4, 6)));
        assert_eq!(parse_version("OpenGL ES GLSL ES 3.20"), Some(Version::new(3, 2)));
    }

    #[test]
    fn glsl_versions_compare_by_value() {
        let glsl_410 = parse_version("4.10").unwrap();
        let glsl_460 = parse_version("4.60 NVIDIA").unwrap();
        assert!(glsl_410 < glsl_460);
        assert!(glsl_460 >= Version::new(4, 1));
        assert_eq!(glsl_460, parse_version("4.6.0 NVIDIA 535.54.03").unwrap());
    }

    #[test]
    fn rejects_strings_without_a_version() {
        assert_eq!(parse_version(""), None);
        assert_eq!(parse_version("OpenGL"), None);
    }

    #[test]
    fn require_accepts_either_version_or_extension() {
        let caps = Capabilities::from_parts(
            Version::new(3, 3),
            ["GL_EXT_texture_filter_anisotropic"],
        );
        assert!(caps.at_least(3, 2));
        assert!(!caps.at_least(4, 0));
        assert!(caps
            .require("anisotropy", Version::new(4, 6), &["GL_EXT_texture_filter_anisotropic"])
            .is_ok());
        assert!(caps.require("compute", Version::new(4, 3), &[]).is_err());
    }

    #[test]
    fn unsupported_error_names_the_feature() {
        let err = require_loaded("glBufferStorage", false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GlwrapError>(),
            Some(&GlwrapError::Unsupported { feature: "glBufferStorage" })
        );
        assert!(require_loaded("glBufferStorage", true).is_ok());
    }
}
