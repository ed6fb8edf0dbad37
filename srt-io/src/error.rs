use std::ffi::CStr;

/// Result type for srt-io.
pub type Result<T> = std::result::Result<T, IoError>;

/// An error for an io operation, backed by the errno that was set for it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", reason_for_error(self.errno_code, &self.reason))]
pub struct IoError {
    errno_code: i32,
    /// What was being attempted, in a human-readable form.
    reason: String,
}

impl IoError {
    /// Any errno is accepted, including ones the platform does not know.
    pub fn new(errno_code: i32, reason: impl Into<String>) -> Self {
        Self {
            errno_code,
            reason: reason.into(),
        }
    }

    /// Capture the calling thread's current errno.
    ///
    /// Call this immediately after the failed operation, before anything else
    /// has a chance to overwrite errno.
    pub fn last_os_error(reason: impl Into<String>) -> Self {
        let error = std::io::Error::last_os_error();
        Self::from_io_error(&error, reason)
    }

    /// Errors that do not carry an os code are reported as EIO, with their text
    /// appended to the reason so it is not lost.
    pub fn from_io_error(error: &std::io::Error, reason: impl Into<String>) -> Self {
        match error.raw_os_error() {
            Some(errno_code) => Self::new(errno_code, reason),
            None => {
                let reason = reason.into();
                log::debug!("io error without an os code: {error:?}");
                Self::new(libc::EIO, format!("{reason} ({error})"))
            }
        }
    }

    /// The errno that was set for the operation.
    pub fn errno_code(&self) -> i32 {
        self.errno_code
    }

    pub fn kind(&self) -> std::io::ErrorKind {
        std::io::Error::from_raw_os_error(self.errno_code).kind()
    }
}

impl From<IoError> for std::io::Error {
    fn from(error: IoError) -> Self {
        std::io::Error::new(error.kind(), error)
    }
}

/// `<reason>: <description> (errno: <code>)`, or a fixed fallback when the
/// platform has no description for the code.
fn reason_for_error(errno_code: i32, reason: &str) -> String {
    match strerror(errno_code) {
        Some(description) => format!("{reason}: {description} (errno: {errno_code})"),
        None => format!("{reason}: Broken strerror, unknown error: {errno_code}"),
    }
}

fn strerror(errno_code: i32) -> Option<String> {
    const DESCRIPTION_LENGTH: usize = 256;
    let mut buffer = [0 as libc::c_char; DESCRIPTION_LENGTH];
    // SAFETY: the buffer is writable for its whole length, and strerror_r always
    // nul-terminates within the length it was given when it succeeds.
    let status = unsafe { libc::strerror_r(errno_code, buffer.as_mut_ptr(), buffer.len()) };
    if status != 0 {
        log::trace!("no description for errno {errno_code}: strerror_r returned {status}");
        return None;
    }
    // SAFETY: strerror_r succeeded, so the buffer holds a nul-terminated string.
    let description = unsafe { CStr::from_ptr(buffer.as_ptr()) };
    Some(description.to_string_lossy().into_owned())
}
