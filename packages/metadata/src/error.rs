/// An error raised by a [`HeadStore`](crate::HeadStore) while touching the document.
///
/// The reconciliation itself never fails on the shape of its input. These errors only surface when the
/// underlying document refuses an operation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeadError {
    /// The document does not have a `<head>` element to read from or write to.
    #[error("the document has no <head> element")]
    MissingHead,

    /// The element is not a child of the document head.
    #[error("the element is not attached to the document head")]
    Detached,

    /// The host document rejected an operation.
    #[error("`{operation}` failed: {message}")]
    Dom {
        /// The operation that was attempted, e.g. `createElement`.
        operation: &'static str,
        /// The message reported by the host.
        message: String,
    },
}

impl HeadError {
    /// Build a [`HeadError::Dom`] from the failed operation and whatever the host reported.
    pub fn dom(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Dom {
            operation,
            message: message.into(),
        }
    }
}
