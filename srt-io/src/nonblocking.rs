//! Turn the outcome of a nonblocking `std::io` call into an [`IoResult`].
//!
//! Would block "errors" are the OS's way of saying that the resource is not
//! actually ready to perform the operation. They become
//! [`IoResult::WouldBlock`]; other errors are fatal and become an [`IoError`].

use crate::{IoError, IoResult, Result, SrtMinorError};

pub fn would_block(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::WouldBlock
}

pub fn interrupted(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::Interrupted
}

/// Classify the outcome of a nonblocking read.
pub fn read_result<T>(result: std::io::Result<T>, reason: &str) -> Result<IoResult<T>> {
    classify(result, SrtMinorError::ReadUnavailable, reason)
}

/// Classify the outcome of a nonblocking write.
pub fn write_result<T>(result: std::io::Result<T>, reason: &str) -> Result<IoResult<T>> {
    classify(result, SrtMinorError::WriteUnavailable, reason)
}

fn classify<T>(
    result: std::io::Result<T>,
    unavailable: SrtMinorError,
    reason: &str,
) -> Result<IoResult<T>> {
    match result {
        Ok(value) => Ok(IoResult::Completed(value)),
        Err(ref err) if would_block(err) => {
            log::trace!("{reason}: would block - {unavailable}");
            Ok(IoResult::WouldBlock(unavailable))
        }
        Err(ref err) if interrupted(err) => {
            log::trace!("{reason}: interrupted, so try again later");
            Ok(IoResult::WouldBlock(SrtMinorError::None))
        }
        Err(err) => {
            let error = IoError::from_io_error(&err, reason);
            log::warn!("{error}");
            Err(error)
        }
    }
}
