use thiserror::Error;

/// Errors raised while rendering a template tree.
///
/// Configuration errors abort the whole render; lookup misses never
/// reach this type, they leave tokens in place instead.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("a table row may reference at most 2 record lists, found {0}")]
    TooManyListKeys(usize),

    #[error("directive list for '{0}' mixes content kinds")]
    MixedDirectiveList(String),

    #[error("'{0}' is not a supported image extension")]
    UnsupportedImage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
