//! Bounded retry around nonblocking operations.
//!
//! An operation that would block is tried again after a backoff, until it
//! completes, fails, or runs out of attempts. Running out of attempts is not an
//! error: you get the last [`IoResult::WouldBlock`] back and decide what to do.

use std::time::Duration;

use crate::{IoResult, Result};

/// Configuration for retrying nonblocking operations.
#[derive(Debug, Clone)]
pub struct Configuration {
    max_attempts: usize,
    backoff: Duration,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_attempts: 64,
            backoff: Duration::from_millis(1),
        }
    }
}

impl Configuration {
    /// How many times the operation is tried in total. The operation always
    /// runs at least once, so 0 behaves like 1.
    ///
    /// Default: 64
    pub fn max_attempts(&mut self, max_attempts: usize) {
        self.max_attempts = max_attempts;
    }

    /// How long to wait after an attempt would have blocked.
    ///
    /// Default: 1ms
    pub fn backoff(&mut self, backoff: Duration) {
        self.backoff = backoff;
    }

    fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }
}

/// Run `operation` until it completes or fails, sleeping the calling thread
/// between attempts that would block.
pub fn retry_while_blocked<T>(
    configuration: &Configuration,
    mut operation: impl FnMut() -> Result<IoResult<T>>,
) -> Result<IoResult<T>> {
    let attempts = configuration.attempts();
    let mut attempt = 1;
    loop {
        match operation()? {
            IoResult::Completed(value) => return Ok(IoResult::Completed(value)),
            IoResult::WouldBlock(minor) if attempts <= attempt => {
                log::debug!("still blocked after {attempts} attempts: {minor}");
                return Ok(IoResult::WouldBlock(minor));
            }
            IoResult::WouldBlock(minor) => {
                log::trace!("attempt {attempt} would block: {minor}");
                std::thread::sleep(configuration.backoff);
                attempt += 1;
            }
        }
    }
}

/// Like [`retry_while_blocked`], but waits with the tokio timer instead of
/// blocking the thread.
pub async fn retry_while_blocked_async<T>(
    configuration: &Configuration,
    mut operation: impl FnMut() -> Result<IoResult<T>>,
) -> Result<IoResult<T>> {
    let attempts = configuration.attempts();
    let mut attempt = 1;
    loop {
        match operation()? {
            IoResult::Completed(value) => return Ok(IoResult::Completed(value)),
            IoResult::WouldBlock(minor) if attempts <= attempt => {
                log::debug!("still blocked after {attempts} attempts: {minor}");
                return Ok(IoResult::WouldBlock(minor));
            }
            IoResult::WouldBlock(minor) => {
                log::trace!("attempt {attempt} would block: {minor}");
                tokio::time::sleep(configuration.backoff).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use crate::{IoError, IoResult, Result, SrtMinorError};

    use super::{retry_while_blocked, retry_while_blocked_async, Configuration};

    fn quick(max_attempts: usize) -> Configuration {
        let mut configuration = Configuration::default();
        configuration.max_attempts(max_attempts);
        configuration.backoff(Duration::ZERO);
        configuration
    }

    /// Would block until the `ready_on` call, then completes with the call count.
    fn ready_after(ready_on: usize) -> impl FnMut() -> Result<IoResult<usize>> {
        let mut calls = 0;
        move || {
            calls += 1;
            if calls < ready_on {
                Ok(IoResult::WouldBlock(SrtMinorError::ReadUnavailable))
            } else {
                Ok(IoResult::Completed(calls))
            }
        }
    }

    #[test]
    fn completes_once_ready() {
        assert_eq!(
            Ok(IoResult::Completed(3)),
            retry_while_blocked(&quick(8), ready_after(3))
        );
    }

    #[test]
    fn exhaustion_returns_the_last_would_block() {
        let mut calls = 0;
        let outcome: Result<IoResult<()>> = retry_while_blocked(&quick(4), || {
            calls += 1;
            Ok(IoResult::WouldBlock(SrtMinorError::from_i32(calls)))
        });
        assert_eq!(4, calls);
        assert_eq!(Ok(IoResult::WouldBlock(SrtMinorError::Congestion)), outcome);
    }

    #[test]
    fn zero_attempts_still_runs_once() {
        assert_eq!(
            Ok(IoResult::Completed(1)),
            retry_while_blocked(&quick(0), ready_after(1))
        );
        assert_eq!(
            Ok(IoResult::WouldBlock(SrtMinorError::ReadUnavailable)),
            retry_while_blocked(&quick(0), ready_after(2))
        );
    }

    #[test]
    fn errors_stop_retrying() {
        let mut calls = 0;
        let outcome: Result<IoResult<()>> = retry_while_blocked(&quick(8), || {
            calls += 1;
            if calls == 2 {
                Err(IoError::new(libc::ECONNRESET, "srt_recvmsg"))
            } else {
                Ok(IoResult::WouldBlock(SrtMinorError::ReadUnavailable))
            }
        });
        assert_eq!(2, calls);
        assert_eq!(Err(IoError::new(libc::ECONNRESET, "srt_recvmsg")), outcome);
    }

    #[tokio::test(start_paused = true)]
    async fn async_completes_once_ready() {
        let mut configuration = Configuration::default();
        configuration.backoff(Duration::from_secs(1));
        assert_eq!(
            Ok(IoResult::Completed(5)),
            retry_while_blocked_async(&configuration, ready_after(5)).await
        );
    }

    #[tokio::test]
    async fn async_exhaustion_returns_the_last_would_block() {
        assert_eq!(
            Ok(IoResult::WouldBlock(SrtMinorError::ReadUnavailable)),
            retry_while_blocked_async(&quick(3), ready_after(10)).await
        );
    }
}
