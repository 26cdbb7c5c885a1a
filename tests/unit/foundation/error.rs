use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KeylcdError::resource("x")
            .to_string()
            .contains("resource error:")
    );
    assert!(
        KeylcdError::protocol("x")
            .to_string()
            .contains("protocol error:")
    );
    assert!(KeylcdError::parse("x").to_string().contains("parse error:"));
    assert!(
        KeylcdError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KeylcdError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
