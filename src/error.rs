//! Error values returned by fallible ring buffer operations.
//!
//! Capacity exhaustion is never an error: it is resolved by truncation and only reported
//! through the diagnostics sink.

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The storage block could not be obtained.
    #[error("failed to allocate storage for {capacity} elements")]
    Alloc { capacity: usize },

    /// The cursor was produced by a different storage block.
    #[error("cursor belongs to a different storage block")]
    ForeignCursor,

    /// The cursor or index lies outside the valid window.
    #[error("position {index} is outside the valid window of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// The first position of a range is after its last position.
    #[error("range start {first} is after range end {last}")]
    InvalidRange { first: usize, last: usize },
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::string::ToString;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            Error::Alloc { capacity: 8 }.to_string(),
            "failed to allocate storage for 8 elements"
        );
        assert_eq!(
            Error::OutOfRange { index: 7, len: 3 }.to_string(),
            "position 7 is outside the valid window of length 3"
        );
    }
}
