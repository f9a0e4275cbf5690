use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlissadeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GlissadeError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        GlissadeError::trigger("x")
            .to_string()
            .contains("trigger error:")
    );
    assert!(
        GlissadeError::scroll("x")
            .to_string()
            .contains("scroll error:")
    );
    assert!(
        GlissadeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlissadeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
