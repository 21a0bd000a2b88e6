//! Loading of the GL function pointers.

use std::ffi::c_void;
use std::sync::Once;

static GL_INIT_ONCE: Once = Once::new();

/// Loads every GL entry point through `gl_loader`.
///
/// Function pointers are loaded exactly once per process; later calls are
/// no-ops. A context must be current on the calling thread.
pub fn load() {
    GL_INIT_ONCE.call_once(|| {
        gl_loader::init_gl();
        gl::load_with(|s| gl_loader::get_proc_address(s).cast());
        tracing::debug!("loaded OpenGL function pointers through gl_loader");
    });
}

/// Loads every GL entry point through a windowing library's loader, e.g.
/// `glfw::Window::get_proc_address` or `glutin::Display::get_proc_address`.
pub fn load_with(loader: impl FnMut(&'static str) -> *const c_void) {
    let mut loader = Some(loader);
    GL_INIT_ONCE.call_once(|| {
        if let Some(loader) = loader.take() {
            gl::load_with(loader);
            tracing::debug!("loaded OpenGL function pointers through a custom loader");
        }
    });
}

/// Returns true once the core entry points are available.
pub fn is_loaded() -> bool {
    gl::GetString::is_loaded() && gl::GetError::is_loaded()
}
