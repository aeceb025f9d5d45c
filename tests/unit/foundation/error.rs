use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AnimError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        AnimError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(AnimError::encode("x").to_string().contains("encode error:"));
    assert_eq!(
        AnimError::unsupported_format(".avi").to_string(),
        "animation extension not recognized: '.avi'"
    );
}

#[test]
fn io_errors_pass_through_unchanged() {
    let base = std::io::Error::new(std::io::ErrorKind::NotFound, "frame.png missing");
    let err = AnimError::from(base);
    assert_eq!(err.to_string(), "frame.png missing");
    assert!(matches!(err, AnimError::Io(_)));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AnimError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn gif_encoder_errors_pass_through_unchanged() {
    let base = ::gif::EncodingError::from(::gif::EncodingFormatError::MissingColorPalette);
    let expected = base.to_string();
    let err = AnimError::from(base);
    assert!(matches!(err, AnimError::Gif(_)), "{err:?}");
    assert_eq!(err.to_string(), expected);
}

#[test]
fn gif_encoder_io_errors_surface_as_io() {
    let base = ::gif::EncodingError::from(std::io::Error::new(
        std::io::ErrorKind::StorageFull,
        "disk full",
    ));
    let err = AnimError::from(base);
    match err {
        AnimError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::StorageFull),
        other => panic!("expected io error, got {other:?}"),
    }
}
