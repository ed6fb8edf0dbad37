//! Errors and nonblocking results for SRT bindings.
//!
//! A nonblocking call into the transport either completes, or would block.
//! Would-block is not an error: it is reported as [`IoResult::WouldBlock`] with
//! the [`SrtMinorError`] that explains why. Hard failures are an [`IoError`],
//! carrying the errno and what was being attempted.
//!
//! See example-srt-echo for a nonblocking socket loop built on these types.

pub(crate) mod error;
pub(crate) mod io_result;
pub(crate) mod minor_error;
pub mod nonblocking;
pub mod retry;

pub use error::IoError;
pub use error::Result;
pub use io_result::IoResult;
pub use minor_error::SrtMinorError;
