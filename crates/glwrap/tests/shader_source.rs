use std::path::PathBuf;

use glwrap::{GlwrapError, ShaderSource};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn file_sources_keep_their_path() {
    let path = fixture("blur.frag");
    let source = ShaderSource::from_file(&path).unwrap();
    assert_eq!(source.file_name(), path.display().to_string());
    assert!(source.source().starts_with("#version 330 core"));
}

#[test]
fn radius_can_be_set_before_compiling() {
    let mut source = ShaderSource::from_file(fixture("blur.frag")).unwrap();
    source.insert_macro_value("RADIUS", 6).unwrap();

    assert!(source.source().contains("#define RADIUS 6\n"));
    // The longer name sharing the prefix is left alone.
    assert!(source.source().contains("#define RADIUS_SCALE 1.0\n"));
}

#[test]
fn missing_macro_is_a_typed_error() {
    let mut source = ShaderSource::from_file(fixture("blur.frag")).unwrap();
    let before = source.source().to_owned();

    let err = source.insert_macro_value("SIGMA", 1.5).unwrap_err();
    match err.downcast_ref::<GlwrapError>() {
        Some(GlwrapError::MissingMacro { shader, name }) => {
            assert!(shader.ends_with("blur.frag"));
            assert_eq!(name, "SIGMA");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(source.source(), before);
}
