//! Error types for contract violations.
//!
//! The errors in this module represent programmer-contract violations, not
//! recoverable runtime conditions: constructing a non-empty collection from
//! zero elements, decomposing an empty sequence, or consuming a one-shot
//! stream twice. Absence of a value (a missing map key, an empty fold
//! source, an unmatched search) is always modeled with [`Option`] and never
//! with these types.

/// Represents an error when a non-empty collection is built from an empty
/// source.
///
/// # Examples
///
/// ```rust
/// use rivulet::error::EmptyCollectionError;
///
/// let error = EmptyCollectionError {
///     collection_name: "NonEmptyList",
/// };
/// assert_eq!(
///     format!("{}", error),
///     "NonEmptyList: cannot be collected from an empty source."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyCollectionError {
    /// The name of the collection type that rejected the empty source.
    pub collection_name: &'static str,
}

impl std::fmt::Display for EmptyCollectionError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}: cannot be collected from an empty source.",
            self.collection_name
        )
    }
}

impl std::error::Error for EmptyCollectionError {}

/// Represents an error when the head or tail of an empty persistent
/// sequence is requested.
///
/// The fluent accessors (`head`, `tail`) model emptiness with [`Option`]
/// and an empty list respectively; this error is produced only by the
/// `try_` accessors that treat an empty sequence as a contract violation.
///
/// # Examples
///
/// ```rust
/// use rivulet::error::EmptySequenceError;
///
/// let error = EmptySequenceError { method_name: "try_uncons" };
/// assert_eq!(
///     format!("{}", error),
///     "List::try_uncons: the sequence is empty."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptySequenceError {
    /// The name of the accessor that was called on the empty sequence.
    pub method_name: &'static str,
}

impl std::fmt::Display for EmptySequenceError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "List::{}: the sequence is empty.",
            self.method_name
        )
    }
}

impl std::error::Error for EmptySequenceError {}

/// Represents an error when a one-shot stream is consumed more than once.
///
/// A `Stream` hands its underlying lazy sequence to exactly one consumer:
/// either a combinator (which forks a new stream from it) or a terminal
/// operation (which drains it). Both a second fork and a second drain are
/// reported with this single error kind.
///
/// # Examples
///
/// ```rust
/// use rivulet::error::StreamReuseError;
///
/// let error = StreamReuseError { operation_name: "map" };
/// assert_eq!(
///     format!("{}", error),
///     "Stream::map: stream already consumed. Each stream may be forked or drained only once."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamReuseError {
    /// The name of the combinator or terminal operation that attempted the
    /// second consumption.
    pub operation_name: &'static str,
}

impl std::fmt::Display for StreamReuseError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "Stream::{}: stream already consumed. Each stream may be forked or drained only once.",
            self.operation_name
        )
    }
}

impl std::error::Error for StreamReuseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_error_display() {
        let error = EmptyCollectionError {
            collection_name: "NonEmptyList",
        };
        assert_eq!(
            format!("{error}"),
            "NonEmptyList: cannot be collected from an empty source."
        );
    }

    #[test]
    fn test_empty_sequence_error_display() {
        let error = EmptySequenceError {
            method_name: "try_head",
        };
        assert_eq!(format!("{error}"), "List::try_head: the sequence is empty.");
    }

    #[test]
    fn test_stream_reuse_error_display() {
        let error = StreamReuseError {
            operation_name: "iter",
        };
        assert_eq!(
            format!("{error}"),
            "Stream::iter: stream already consumed. Each stream may be forked or drained only once."
        );
    }

    #[test]
    fn test_errors_are_std_errors() {
        use std::error::Error;

        let empty_collection = EmptyCollectionError {
            collection_name: "NonEmptyList",
        };
        let empty_sequence = EmptySequenceError {
            method_name: "try_tail",
        };
        let stream_reuse = StreamReuseError {
            operation_name: "fold",
        };
        let _: &dyn Error = &empty_collection;
        let _: &dyn Error = &empty_sequence;
        let _: &dyn Error = &stream_reuse;
        assert!(empty_collection.source().is_none());
        assert!(empty_sequence.source().is_none());
        assert!(stream_reuse.source().is_none());
    }

    #[test]
    fn test_error_equality_and_clone() {
        let error = StreamReuseError {
            operation_name: "zip",
        };
        let cloned = error.clone();
        assert_eq!(error, cloned);
        assert_ne!(
            error,
            StreamReuseError {
                operation_name: "fold",
            }
        );
    }
}
