use std::cell::RefCell;
use std::panic::Location;
use std::path::PathBuf;
use std::rc::Rc;

use glwrap_debug::{DebugConfig, DebugOutput, GlError, KnowledgeBase};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn loads_entries_from_a_file() {
    let kb = KnowledgeBase::load(fixture("sample_errors.txt")).unwrap();
    assert_eq!(kb.len(), 2);

    let clear = kb.get("glClear").unwrap();
    assert_eq!(
        clear.explanations(GlError::InvalidValue),
        ["- Any bit other than the three defined bits is set in mask."]
    );

    let draw = kb.get("glDrawElements").unwrap();
    assert_eq!(draw.explanations(GlError::InvalidEnum).len(), 2);
    assert_eq!(
        draw.explanations(GlError::InvalidOperation),
        ["- Any of the following is true:\n\
          a geometry shader is active and mode is incompatible with its input primitive type.\n\
          a non-zero buffer object name is bound to an enabled array and its data store is mapped."]
    );
    assert_eq!(
        draw.notes(),
        ["Indices are read from the buffer bound to GL_ELEMENT_ARRAY_BUFFER."]
    );
}

#[test]
fn missing_file_is_an_error_with_the_path() {
    let err = KnowledgeBase::load(fixture("does_not_exist.txt")).unwrap_err();
    assert!(format!("{err:#}").contains("does_not_exist.txt"));
}

#[test]
fn loaded_knowledge_base_explains_reported_errors() {
    let kb = KnowledgeBase::load(fixture("sample_errors.txt")).unwrap();
    let printed = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&printed);

    let config = DebugConfig::default()
        .print_backtrace(false)
        .stop_after_errors(None);
    let mut output = DebugOutput::new(config)
        .with_knowledge_base(kb)
        .with_printer(move |message| sink.borrow_mut().push_str(&message.to_string()));

    output.check_error(
        gl::INVALID_VALUE,
        "glDrawElements(mode, count, type, indices)",
        module_path!(),
        Location::caller(),
    );

    let printed = printed.borrow();
    assert!(printed.contains("---------========={[ Invalid Value ]}=========---------"));
    assert!(printed.contains("Caused by glDrawElements(mode, count, type, indices)"));
    assert!(printed.contains("  void glDrawElements(GLenum mode,\n"));
    assert!(printed.contains("- Count is negative.\n"));
    assert!(printed.contains("Note that: \n- Indices are read from the buffer"));
}
