//! Checked GL calls.
//!
//! Every driver call in this crate goes through [`gl_call!`](crate::gl_call).
//! With the `debug` feature the macro polls `glGetError` right after the call
//! and hands the result to the installed `glwrap_debug::DebugOutput` together
//! with the call text, the module and the caller's source location.
//! Without it the macro is a plain unsafe call.

/// Calls a function of the `gl` crate and checks the error flag afterwards.
///
/// ```rust,ignore
/// let buffer = 7;
/// glwrap::gl_call!(BindBuffer(gl::ARRAY_BUFFER, buffer));
/// let ptr = glwrap::gl_call!(GetString(gl::VERSION));
/// ```
///
/// The return value of the wrapped function is passed through.
#[macro_export]
macro_rules! gl_call {
    ($func:ident($($arg:expr),* $(,)?)) => {{
        #[allow(unused_unsafe)]
        let result = unsafe { $crate::gl::$func($($arg),*) };
        $crate::call::after_call(
            concat!("gl", stringify!($func), "(", stringify!($($arg),*), ")"),
            module_path!(),
        );
        result
    }};
}

/// Runs after every [`gl_call!`](crate::gl_call).
///
/// The feature check lives here rather than in the macro so that it follows
/// the features `glwrap` was built with, not those of the calling crate.
#[track_caller]
#[inline]
pub fn after_call(call: &str, module: &str) {
    #[cfg(feature = "debug")]
    {
        let raw = unsafe { gl::GetError() };
        glwrap_debug::check_error(raw, call, module, std::panic::Location::caller());
    }

    #[cfg(not(feature = "debug"))]
    {
        let _ = (call, module);
        tracing::trace!(location = %std::panic::Location::caller(), "{call}");
    }
}

/// Discards every pending error flag without reporting it.
///
/// `glGetError` returns one flag per call, and a driver may queue several.
pub fn clear_errors() {
    unsafe { while gl::GetError() != gl::NO_ERROR {} }
}
