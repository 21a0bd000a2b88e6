//! Explanations of why a GL function raises a given error.
//!
//! The source is a plain text file with one entry per function:
//!
//! ```text
//! void glBindBuffer(GLenum target, GLuint buffer);
//! GL_INVALID_ENUM is generated if target is not one of the allowable values.
//! GL_INVALID_VALUE is generated if buffer is not a name previously returned from a call to glGenBuffers.
//!
//! ```
//!
//! An entry is a signature line followed by lines that start with a GL error
//! macro name, list continuation lines and free-standing notes, terminated by
//! a blank line.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;

use crate::gl_error::GlError;

const BUNDLED_SOURCE: &str = include_str!("../GLerrors.txt");

static BUNDLED: Lazy<KnowledgeBase> = Lazy::new(|| {
    let knowledge_base = KnowledgeBase::parse(BUNDLED_SOURCE);
    tracing::debug!(functions = knowledge_base.len(), "parsed bundled GL error knowledge base");
    knowledge_base
});

const GENERATED_IF: [&str; 3] = [
    " is generated if ",
    " error is generated if ",
    " may be generated if ",
];

/// What the documentation says about one GL function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    signature: String,
    errors: [Vec<String>; GlError::CATEGORIES.len()],
    notes: Vec<String>,
}

impl ErrorInfo {
    /// The C signature line, e.g. `void glBindBuffer(GLenum target, GLuint buffer);`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The cleaned explanations for `error`, each starting with "- ".
    pub fn explanations(&self, error: GlError) -> &[String] {
        match error.index() {
            Some(index) => &self.errors[index],
            None => &[],
        }
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// Function name → [`ErrorInfo`] map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    functions: HashMap<String, ErrorInfo>,
}

impl KnowledgeBase {
    /// The knowledge base shipped with the crate, parsed on first use.
    pub fn bundled() -> &'static KnowledgeBase {
        &BUNDLED
    }

    /// Reads and parses a knowledge base file.
    pub fn load(path: impl AsRef<Path>) -> Result<KnowledgeBase> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read GL error knowledge base {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> KnowledgeBase {
        let mut functions = HashMap::new();
        let mut lines = text.lines();

        loop {
            let Some(signature) = lines.by_ref().find(|line| !line.trim().is_empty()) else {
                break;
            };

            let mut info = ErrorInfo {
                signature: signature.trim_end().to_owned(),
                ..ErrorInfo::default()
            };
            // Category index of the item currently absorbing list lines.
            let mut open_list: Option<usize> = None;

            for line in lines.by_ref().take_while(|line| !line.trim().is_empty()) {
                let token = line.split_whitespace().next().unwrap_or_default();

                match GlError::from_macro_name(token).and_then(GlError::index) {
                    Some(index) => {
                        let item = clean_error_line(line, token);
                        open_list = item.trim_end().ends_with(':').then_some(index);
                        info.errors[index].push(item);
                    }
                    None => match open_list.and_then(|index| info.errors[index].last_mut()) {
                        Some(item) => {
                            item.push('\n');
                            item.push_str(line);
                        }
                        None => info.notes.push(line.to_owned()),
                    },
                }
            }

            match function_name(&info.signature) {
                Some(name) => {
                    functions.entry(name.to_owned()).or_insert(info);
                }
                None => tracing::warn!(line = %info.signature, "skipping entry without a signature"),
            }
        }

        KnowledgeBase { functions }
    }

    pub fn get(&self, function: &str) -> Option<&ErrorInfo> {
        self.functions.get(function)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Explains why `call` may have raised `error`.
    ///
    /// `call` is the call string as printed in reports; everything before
    /// the first `(` is the function name. Returns `None` when the function
    /// is unknown or has no explanation for this category.
    pub fn detailed_info(&self, call: &str, error: GlError) -> Option<String> {
        let name = call.split('(').next().unwrap_or(call).trim();
        let info = self.get(name)?;
        let explanations = info.explanations(error);
        if explanations.is_empty() {
            return None;
        }

        let mut text = String::from("The following OpenGL function: \n\n");
        text.push_str(&format_signature(&info.signature));
        text.push_str("\n\nHas generated the error because one of the following(s) were true:\n");
        for explanation in explanations {
            text.push_str(explanation);
            text.push('\n');
        }
        if !info.notes.is_empty() {
            text.push_str("\nNote that: \n");
            for note in &info.notes {
                text.push_str("- ");
                text.push_str(note);
                text.push('\n');
            }
        }
        Some(text)
    }
}

/// The text between the last space before `(` and the `(`.
fn function_name(signature: &str) -> Option<&str> {
    let open = signature.find('(')?;
    let start = signature[..open].rfind(' ').map_or(0, |space| space + 1);
    let name = signature[start..open].trim();
    (!name.is_empty()).then_some(name)
}

/// `GL_INVALID_ENUM is generated if target is ...` → `- Target is ...`.
fn clean_error_line(line: &str, token: &str) -> String {
    let after_token = line.trim_start().strip_prefix(token).unwrap_or_default();
    let rest = GENERATED_IF
        .iter()
        .find_map(|prefix| after_token.strip_prefix(prefix))
        // `GL_X is generated by glFoo if ...` keeps the caller: `- Generated by glFoo if ...`.
        .or_else(|| {
            after_token
                .strip_prefix(" is ")
                .filter(|rest| rest.starts_with("generated by "))
        })
        .unwrap_or_else(|| after_token.trim_start());

    let mut chars = rest.chars();
    let mut item = String::from("- ");
    if let Some(first) = chars.next() {
        item.extend(first.to_uppercase());
        item.push_str(chars.as_str());
    }
    item
}

/// Indents the signature and puts each parameter on its own line, aligned
/// after the opening parenthesis.
pub fn format_signature(signature: &str) -> String {
    let indented = format!("  {signature}");
    let Some(open) = indented.find('(') else {
        return indented;
    };
    let continuation = format!("\n{}", " ".repeat(open));

    let mut formatted = String::with_capacity(indented.len() * 2);
    for (index, c) in indented.char_indices() {
        formatted.push(c);
        if c == ',' && index > open {
            formatted.push_str(&continuation);
        }
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIND_BUFFER: &str = "\
void glBindBuffer(GLenum target, GLuint buffer);
GL_INVALID_ENUM is generated if target is not one of the allowable values.
GL_INVALID_VALUE is generated if buffer is not a name previously returned from a call to glGenBuffers.
";

    #[test]
    fn extracts_the_function_name() {
        assert_eq!(function_name("void glBindBuffer(GLenum target, GLuint buffer);"), Some("glBindBuffer"));
        assert_eq!(function_name("GLuint glCreateShader(GLenum shaderType);"), Some("glCreateShader"));
        assert_eq!(function_name("no parenthesis here"), None);
    }

    #[test]
    fn cleans_the_generated_if_prefix() {
        let kb = KnowledgeBase::parse(BIND_BUFFER);
        let info = kb.get("glBindBuffer").unwrap();
        assert_eq!(
            info.explanations(GlError::InvalidValue),
            ["- Buffer is not a name previously returned from a call to glGenBuffers."]
        );
        assert_eq!(
            info.explanations(GlError::InvalidEnum),
            ["- Target is not one of the allowable values."]
        );
        assert!(info.explanations(GlError::InvalidOperation).is_empty());
        assert!(info.notes().is_empty());
    }

    #[test]
    fn generated_by_lines_keep_the_calling_function() {
        let kb = KnowledgeBase::parse(
            "void glBeginTransformFeedback(GLenum primitiveMode);\n\
             GL_INVALID_OPERATION is generated by glDrawArrays and glDrawArraysInstanced if \
             transform feedback is active and mode does not exactly match primitiveMode.\n",
        );
        let info = kb.get("glBeginTransformFeedback").unwrap();
        assert_eq!(
            info.explanations(GlError::InvalidOperation),
            ["- Generated by glDrawArrays and glDrawArraysInstanced if transform feedback is \
              active and mode does not exactly match primitiveMode."]
        );
    }

    #[test]
    fn recognises_the_alternative_prefixes() {
        let kb = KnowledgeBase::parse(
            "void glFoo(GLint x);\n\
             GL_INVALID_OPERATION error is generated if no program is bound.\n\
             GL_OUT_OF_MEMORY may be generated if the driver runs dry.\n",
        );
        let info = kb.get("glFoo").unwrap();
        assert_eq!(info.explanations(GlError::InvalidOperation), ["- No program is bound."]);
        assert_eq!(info.explanations(GlError::OutOfMemory), ["- The driver runs dry."]);
    }

    #[test]
    fn items_ending_in_a_colon_absorb_the_following_lines() {
        let kb = KnowledgeBase::parse(
            "void glFoo(GLenum mode);\n\
             GL_INVALID_OPERATION is generated if any of the following is true:\n\
             mode is GL_POINTS\n\
             mode is GL_LINES\n\
             GL_INVALID_VALUE is generated if count is negative.\n\
             The initial value is zero.\n",
        );
        let info = kb.get("glFoo").unwrap();
        assert_eq!(
            info.explanations(GlError::InvalidOperation),
            ["- Any of the following is true:\nmode is GL_POINTS\nmode is GL_LINES"]
        );
        assert_eq!(info.explanations(GlError::InvalidValue), ["- Count is negative."]);
        assert_eq!(info.notes(), ["The initial value is zero."]);
    }

    #[test]
    fn first_entry_for_a_name_wins() {
        let kb = KnowledgeBase::parse(
            "void glFoo(GLint x);\n\
             GL_INVALID_VALUE is generated if x is negative.\n\
             \n\
             void glFoo(GLint x);\n\
             GL_INVALID_VALUE is generated if x is odd.\n",
        );
        assert_eq!(kb.len(), 1);
        assert_eq!(
            kb.get("glFoo").unwrap().explanations(GlError::InvalidValue),
            ["- X is negative."]
        );
    }

    #[test]
    fn extra_blank_lines_between_entries_are_skipped() {
        let kb = KnowledgeBase::parse(&format!("\n\n{BIND_BUFFER}\n\n\n{BIND_BUFFER}"));
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn signature_parameters_are_aligned() {
        // '(' sits at column 19 once the signature is indented by two.
        assert_eq!(
            format_signature("void glBindBuffer(GLenum target, GLuint buffer);"),
            format!("  void glBindBuffer(GLenum target,\n{} GLuint buffer);", " ".repeat(19))
        );
    }

    #[test]
    fn detailed_info_layout() {
        let kb = KnowledgeBase::parse(&format!("{BIND_BUFFER}The buffer may be zero.\n"));
        let text = kb
            .detailed_info("glBindBuffer(target, buffer)", GlError::InvalidValue)
            .unwrap();
        assert!(text.starts_with("The following OpenGL function: \n\n  void glBindBuffer("));
        assert!(text.contains(
            "Has generated the error because one of the following(s) were true:\n\
             - Buffer is not a name previously returned from a call to glGenBuffers.\n"
        ));
        assert!(text.ends_with("\nNote that: \n- The buffer may be zero.\n"));
    }

    #[test]
    fn detailed_info_is_empty_without_a_matching_explanation() {
        let kb = KnowledgeBase::parse(BIND_BUFFER);
        assert_eq!(kb.detailed_info("glBindBuffer", GlError::OutOfMemory), None);
        assert_eq!(kb.detailed_info("glClear(mask)", GlError::InvalidValue), None);
        assert_eq!(kb.detailed_info("glBindBuffer", GlError::Unknown(7)), None);
    }

    #[test]
    fn bundled_knowledge_base_knows_common_functions() {
        let kb = KnowledgeBase::bundled();
        assert!(!kb.is_empty());
        let info = kb.get("glBindBuffer").unwrap();
        assert!(!info.explanations(GlError::InvalidEnum).is_empty());
    }
}
