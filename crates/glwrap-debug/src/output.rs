//! Formatting and delivery of diagnostics.
//!
//! A [`DebugOutput`] owns the configuration, the knowledge base, the printer
//! callback and the error bookkeeping. One instance can be installed per
//! thread; the free functions of this module route to it and fall back to
//! `tracing` when nothing is installed.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::Location;

use gl::types::GLenum;

use crate::config::{DebugConfig, LimitAction};
use crate::gl_error::GlError;
use crate::knowledge_base::KnowledgeBase;

/// Receives every formatted report.
pub type Printer = Box<dyn FnMut(&ErrorMessage)>;

const TOO_MANY_ERRORS: &str = "glwrap has encountered too many errors, stopping now.";

/// One diagnostic, ready to be printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub title: String,
    pub message: String,
    /// The GL call that failed, e.g. `glBindBuffer(target, name)`.
    pub call: Option<String>,
    pub module: Option<String>,
    pub location: Option<&'static Location<'static>>,
    pub backtrace: Option<String>,
}

impl ErrorMessage {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            call: None,
            module: None,
            location: None,
            backtrace: None,
        }
    }

    pub fn caused_by(mut self, call: impl Into<String>) -> Self {
        self.call = Some(call.into());
        self
    }

    pub fn in_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn at(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    fn header(&self) -> String {
        format!("---------========={{[ {} ]}}=========---------", self.title)
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.header();
        write!(f, "\n{header}\n\n")?;

        if let Some(call) = &self.call {
            writeln!(f, "Caused by {call}")?;
        }
        if let Some(module) = &self.module {
            writeln!(f, "In module: {module}")?;
        }
        if let Some(location) = self.location {
            write!(f, "In '{}' at line {}\n\n", location.file(), location.line())?;
        }
        if let Some(backtrace) = &self.backtrace {
            write!(f, "Stack trace:\n{backtrace}\n")?;
        }

        f.write_str(&self.message)?;
        write!(f, "\n{}\n\n", "-".repeat(header.chars().count()))
    }
}

/// Reports driver errors and binding mistakes.
pub struct DebugOutput {
    config: DebugConfig,
    knowledge_base: Cow<'static, KnowledgeBase>,
    printer: Printer,
    errors_reported: usize,
    last_error: Option<GlError>,
}

impl DebugOutput {
    /// An output using the bundled knowledge base and printing to stderr.
    pub fn new(config: DebugConfig) -> Self {
        Self {
            config,
            knowledge_base: Cow::Borrowed(KnowledgeBase::bundled()),
            printer: Box::new(|message: &ErrorMessage| eprint!("{message}")),
            errors_reported: 0,
            last_error: None,
        }
    }

    pub fn with_knowledge_base(mut self, knowledge_base: KnowledgeBase) -> Self {
        self.knowledge_base = Cow::Owned(knowledge_base);
        self
    }

    /// Replaces the stderr printer.
    pub fn with_printer(mut self, printer: impl FnMut(&ErrorMessage) + 'static) -> Self {
        self.printer = Box::new(printer);
        self
    }

    pub fn config(&self) -> &DebugConfig {
        &self.config
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Number of reports delivered so far.
    pub fn errors_reported(&self) -> usize {
        self.errors_reported
    }

    /// The error captured by the most recent [`DebugOutput::check_error`].
    pub fn last_error(&self) -> Option<GlError> {
        self.last_error
    }

    pub fn take_last_error(&mut self) -> Option<GlError> {
        self.last_error.take()
    }

    /// Records the `glGetError` value polled after `call` and reports it if
    /// it is an error.
    pub fn check_error(
        &mut self,
        raw: GLenum,
        call: &str,
        module: &str,
        location: &'static Location<'static>,
    ) -> Option<GlError> {
        self.last_error = GlError::from_raw(raw);
        let error = self.last_error?;

        let explanation = if self.config.detailed_output {
            self.knowledge_base.detailed_info(call, error)
        } else {
            None
        };
        let message = ErrorMessage::new(error.to_string(), explanation.unwrap_or_default())
            .caused_by(call)
            .in_module(module)
            .at(location);
        self.report(message);

        Some(error)
    }

    /// Reports `message` if the last captured error is `expected`.
    pub fn print_if_error(&mut self, expected: GlError, message: ErrorMessage) {
        if self.last_error == Some(expected) {
            self.report(message);
        }
    }

    /// Delivers `message` to the printer and counts it.
    pub fn report(&mut self, mut message: ErrorMessage) {
        if self.config.print_backtrace && message.backtrace.is_none() {
            message.backtrace = capture_backtrace(self.config.skip_frames);
        }

        tracing::debug!(
            title = %message.title,
            call = message.call.as_deref().unwrap_or_default(),
            "delivering GL diagnostic"
        );
        (self.printer)(&message);
        self.errors_reported += 1;

        if let Some(limit) = self.config.stop_after_errors {
            if self.errors_reported >= limit {
                self.stop();
            }
        }
    }

    fn stop(&self) -> ! {
        tracing::error!(reports = self.errors_reported, "{TOO_MANY_ERRORS}");
        match self.config.limit_action {
            LimitAction::Abort => {
                eprintln!("\n{TOO_MANY_ERRORS}\n");
                std::process::abort()
            }
            LimitAction::Panic => panic!("{TOO_MANY_ERRORS}"),
        }
    }
}

impl fmt::Debug for DebugOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugOutput")
            .field("config", &self.config)
            .field("functions", &self.knowledge_base.len())
            .field("errors_reported", &self.errors_reported)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

fn capture_backtrace(skip: usize) -> Option<String> {
    let trimmed = trim_frames(&Backtrace::force_capture().to_string(), skip);
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Drops the first `skip` frames of a rendered backtrace.
///
/// Frames are the `N: symbol` lines; the `at file:line` lines below a frame
/// follow it.
pub fn trim_frames(rendered: &str, skip: usize) -> String {
    let mut trimmed = String::new();
    let mut keep = false;
    for line in rendered.lines() {
        if let Some(index) = frame_index(line) {
            keep = index >= skip;
        }
        if keep {
            trimmed.push_str(line);
            trimmed.push('\n');
        }
    }
    trimmed
}

fn frame_index(line: &str) -> Option<usize> {
    let (number, _) = line.trim_start().split_once(": ")?;
    number.parse().ok()
}

// ---------------------------------------------------------------------------
// Per-thread installed output
// ---------------------------------------------------------------------------

thread_local! {
    static INSTALLED: RefCell<Option<DebugOutput>> = const { RefCell::new(None) };
    // Last error seen while nothing was installed.
    static UNINSTALLED_LAST_ERROR: Cell<Option<GlError>> = const { Cell::new(None) };
}

/// Installs `output` for the current thread, returning the previous one.
pub fn install(output: DebugOutput) -> Option<DebugOutput> {
    INSTALLED.with(|slot| slot.borrow_mut().replace(output))
}

pub fn uninstall() -> Option<DebugOutput> {
    INSTALLED.with(|slot| slot.borrow_mut().take())
}

pub fn is_installed() -> bool {
    INSTALLED.with(|slot| slot.try_borrow().map_or(true, |output| output.is_some()))
}

/// Runs `f` on the installed output.
///
/// Returns `None` if nothing is installed, or if called from inside another
/// `with_installed` (e.g. from a printer callback).
pub fn with_installed<R>(f: impl FnOnce(&mut DebugOutput) -> R) -> Option<R> {
    INSTALLED.with(|slot| {
        let mut slot = slot.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    })
}

/// Routes a polled `glGetError` value to the installed output.
pub fn check_error(
    raw: GLenum,
    call: &str,
    module: &str,
    location: &'static Location<'static>,
) -> Option<GlError> {
    if let Some(error) = with_installed(|output| output.check_error(raw, call, module, location)) {
        return error;
    }

    let error = GlError::from_raw(raw);
    UNINSTALLED_LAST_ERROR.with(|last| last.set(error));
    if let Some(error) = error {
        tracing::error!(
            %error,
            call,
            module,
            file = location.file(),
            line = location.line(),
            "OpenGL error"
        );
    }
    error
}

/// Routes a free-form diagnostic to the installed output.
pub fn report(message: ErrorMessage) {
    let mut pending = Some(message);
    with_installed(|output| {
        if let Some(message) = pending.take() {
            output.report(message);
        }
    });

    if let Some(message) = pending {
        tracing::warn!(title = %message.title, "{}", message.message.trim_end());
    }
}

pub fn last_error() -> Option<GlError> {
    with_installed(|output| output.last_error())
        .unwrap_or_else(|| UNINSTALLED_LAST_ERROR.with(Cell::get))
}

pub fn take_last_error() -> Option<GlError> {
    with_installed(DebugOutput::take_last_error)
        .unwrap_or_else(|| UNINSTALLED_LAST_ERROR.with(Cell::take))
}

/// Reports `message` if the last captured error is `expected`.
pub fn print_if_error(expected: GlError, message: ErrorMessage) {
    if last_error() == Some(expected) {
        report(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    const KNOWLEDGE: &str = "\
void glBindBuffer(GLenum target, GLuint buffer);
GL_INVALID_ENUM is generated if target is not one of the allowable values.
GL_INVALID_VALUE is generated if buffer is not a name previously returned from a call to glGenBuffers.
";

    fn quiet_config() -> DebugConfig {
        DebugConfig::default()
            .print_backtrace(false)
            .stop_after_errors(None)
    }

    fn capturing(config: DebugConfig) -> (DebugOutput, Rc<RefCell<Vec<String>>>) {
        let printed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&printed);
        let output = DebugOutput::new(config)
            .with_knowledge_base(KnowledgeBase::parse(KNOWLEDGE))
            .with_printer(move |message| sink.borrow_mut().push(message.to_string()));
        (output, printed)
    }

    #[test]
    fn formatted_message_layout() {
        let message = ErrorMessage::new("Invalid Value", "details")
            .caused_by("glBindBuffer(target, name)")
            .in_module("glwrap::buffer");
        let text = message.to_string();

        let header = "---------========={[ Invalid Value ]}=========---------";
        assert!(text.starts_with(&format!("\n{header}\n\n")));
        assert!(text.contains("Caused by glBindBuffer(target, name)\n"));
        assert!(text.contains("In module: glwrap::buffer\n"));
        assert!(text.ends_with(&format!("details\n{}\n\n", "-".repeat(header.len()))));
    }

    #[test]
    fn location_line_uses_the_caller() {
        let location = Location::caller();
        let text = ErrorMessage::new("t", "m").at(location).to_string();
        assert!(text.contains(&format!("In '{}' at line {}\n\n", file!(), location.line())));
    }

    #[test]
    fn captured_error_is_consumed_once() {
        let (mut output, printed) = capturing(quiet_config());

        let error = output.check_error(
            gl::INVALID_VALUE,
            "glBindBuffer(target, name)",
            module_path!(),
            Location::caller(),
        );
        assert_eq!(error, Some(GlError::InvalidValue));
        assert_eq!(output.last_error(), Some(GlError::InvalidValue));
        assert_eq!(output.take_last_error(), Some(GlError::InvalidValue));
        assert_eq!(output.take_last_error(), None);

        let printed = printed.borrow();
        assert_eq!(printed.len(), 1);
        assert!(printed[0].contains("{[ Invalid Value ]}"));
        assert!(printed[0].contains("Caused by glBindBuffer(target, name)"));
        assert!(printed[0].contains("- Buffer is not a name previously returned"));
    }

    #[test]
    fn successful_calls_print_nothing_and_clear_the_last_error() {
        let (mut output, printed) = capturing(quiet_config());
        output.check_error(gl::INVALID_ENUM, "glBindBuffer", "m", Location::caller());
        output.check_error(gl::NO_ERROR, "glBindBuffer", "m", Location::caller());
        assert_eq!(output.last_error(), None);
        assert_eq!(printed.borrow().len(), 1);
    }

    #[test]
    fn detailed_output_can_be_turned_off() {
        let (mut output, printed) = capturing(quiet_config().detailed_output(false));
        output.check_error(gl::INVALID_VALUE, "glBindBuffer", "m", Location::caller());
        let printed = printed.borrow();
        assert!(printed[0].contains("{[ Invalid Value ]}"));
        assert!(!printed[0].contains("The following OpenGL function"));
    }

    #[test]
    fn unknown_errors_are_still_reported() {
        let (mut output, printed) = capturing(quiet_config());
        let error = output.check_error(0x1234, "glFoo()", "m", Location::caller());
        assert_eq!(error, Some(GlError::Unknown(0x1234)));
        assert!(printed.borrow()[0].contains("{[ Unknown Error (0x1234) ]}"));
    }

    #[test]
    fn print_if_error_matches_the_last_error() {
        let (mut output, printed) = capturing(quiet_config());
        output.check_error(gl::INVALID_OPERATION, "glLinkProgram", "m", Location::caller());

        output.print_if_error(GlError::InvalidValue, ErrorMessage::new("Wrong", "not printed"));
        output.print_if_error(GlError::InvalidOperation, ErrorMessage::new("Hint", "printed"));

        let printed = printed.borrow();
        assert_eq!(printed.len(), 2);
        assert!(printed[1].contains("{[ Hint ]}"));
    }

    #[test]
    #[should_panic(expected = "too many errors")]
    fn error_limit_stops_the_program() {
        let config = quiet_config()
            .stop_after_errors(Some(2))
            .limit_action(LimitAction::Panic);
        let (mut output, _printed) = capturing(config);
        output.report(ErrorMessage::new("first", ""));
        assert_eq!(output.errors_reported(), 1);
        output.report(ErrorMessage::new("second", ""));
    }

    #[test]
    fn trims_the_innermost_frames() {
        let rendered = "   0: std::backtrace::Backtrace::create\n\
                        \x20            at /rustc/library/std/src/backtrace.rs:331:13\n\
                        \x20  1: glwrap_debug::output::capture_backtrace\n\
                        \x20  2: my_app::render\n\
                        \x20            at ./src/main.rs:10:5\n";
        assert_eq!(
            trim_frames(rendered, 2),
            "   2: my_app::render\n             at ./src/main.rs:10:5\n"
        );
        assert_eq!(trim_frames("disabled backtrace", 0), "");
    }

    #[test]
    fn installed_output_receives_free_function_reports() {
        let (output, printed) = capturing(quiet_config());
        assert!(install(output).is_none());
        assert!(is_installed());

        check_error(gl::INVALID_ENUM, "glBindBuffer", "m", Location::caller());
        assert_eq!(last_error(), Some(GlError::InvalidEnum));
        print_if_error(GlError::InvalidEnum, ErrorMessage::new("Hint", ""));
        report(ErrorMessage::new("Free form", "text"));

        let output = uninstall().unwrap();
        assert_eq!(output.errors_reported(), 3);
        assert_eq!(printed.borrow().len(), 3);
        assert!(!is_installed());
    }

    #[test]
    fn uninstalled_thread_still_tracks_the_last_error() {
        uninstall();
        check_error(gl::OUT_OF_MEMORY, "glBufferData", "m", Location::caller());
        assert_eq!(last_error(), Some(GlError::OutOfMemory));
        assert_eq!(take_last_error(), Some(GlError::OutOfMemory));
        assert_eq!(last_error(), None);
    }
}
