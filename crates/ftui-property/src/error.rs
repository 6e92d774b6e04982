#![forbid(unsafe_code)]

//! Error returned when writing through a read-only property.

/// Attempt to set the value of a read-only property.
///
/// Raised by every `set` on a property built with one of the `read_only*`
/// constructors. Storage is untouched and no observer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReadOnlySetError;

impl std::fmt::Display for ReadOnlySetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("attempt to set value for read only property")
    }
}

impl std::error::Error for ReadOnlySetError {}
