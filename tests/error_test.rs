use std::io;
use std::path::PathBuf;

use minijinja_emit::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::Io(_) => (),
        _ => panic!("Expected Io variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::Config("`templates` must contain at least one descriptor".to_string());
    assert_eq!(
        err.to_string(),
        "Configuration error: `templates` must contain at least one descriptor"
    );

    let err = Error::WriteAsset {
        path: PathBuf::from("dist/index.html"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert_eq!(err.to_string(), "Failed to write asset 'dist/index.html': denied");
}
