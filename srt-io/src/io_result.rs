use crate::SrtMinorError;

/// A result for an io operation that was done on a nonblocking resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoResult<T> {
    /// The operation could not be completed without blocking. Try again later.
    WouldBlock(SrtMinorError),
    /// The operation was completed.
    Completed(T),
}

impl<T> IoResult<T> {
    /// True when the operation should be tried again later.
    pub fn is_would_block(&self) -> bool {
        matches!(self, IoResult::WouldBlock(_))
    }

    /// True when the operation produced a value.
    pub fn is_completed(&self) -> bool {
        matches!(self, IoResult::Completed(_))
    }

    /// The completed value, discarding why it would have blocked.
    pub fn completed(self) -> Option<T> {
        match self {
            IoResult::WouldBlock(_) => None,
            IoResult::Completed(value) => Some(value),
        }
    }

    /// Why the operation would have blocked, if it did.
    pub fn would_block(&self) -> Option<SrtMinorError> {
        match self {
            IoResult::WouldBlock(minor) => Some(*minor),
            IoResult::Completed(_) => None,
        }
    }

    /// Transform the completed value, keeping any would-block classifier.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> IoResult<U> {
        match self {
            IoResult::WouldBlock(minor) => IoResult::WouldBlock(minor),
            IoResult::Completed(value) => IoResult::Completed(f(value)),
        }
    }

    /// Borrow the completed value.
    pub fn as_ref(&self) -> IoResult<&T> {
        match self {
            IoResult::WouldBlock(minor) => IoResult::WouldBlock(*minor),
            IoResult::Completed(value) => IoResult::Completed(value),
        }
    }
}
