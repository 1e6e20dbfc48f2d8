//! Small utilities shared by the Outrage tooling crates.

pub mod color;

pub type AnyResult<T = (), E = anyhow::Error> = anyhow::Result<T, E>;

/// Shorthand for `Ok(())`.
pub const fn ok<E>() -> Result<(), E> {
    Ok(())
}

/// Truncates a fixed-capacity C string field at its first NUL byte.
///
/// Table and archive directory strings are stored as NUL-padded byte fields;
/// everything from the first NUL onwards is garbage and must be discarded.
///
/// ```
/// use outrage_utils::zero_terminated;
/// assert_eq!(zero_terminated(b"boom.wav\0\0\0junk"), b"boom.wav");
/// assert_eq!(zero_terminated(b"no-nul"), b"no-nul");
/// ```
pub fn zero_terminated(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}
