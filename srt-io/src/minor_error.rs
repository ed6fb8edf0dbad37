/// Why a nonblocking SRT operation could not proceed.
///
/// These are the minor codes SRT reports under its "try again" major code.
/// Values SRT adds later are carried as `Other` and round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SrtMinorError {
    /// No particular reason was given.
    None,
    /// The send buffer is full (`SRT_EASYNCSND`).
    WriteUnavailable,
    /// There is nothing to receive yet (`SRT_EASYNCRCV`).
    ReadUnavailable,
    /// The transmission timed out (`SRT_ETIMEOUT`).
    TransmissionTimeout,
    /// Sending is held back by congestion control (`SRT_ECONGEST`).
    Congestion,
    /// A minor code this crate does not name.
    Other(i32),
}

/// SRT error codes are `major * 1000 + minor`.
const MAJOR_CODE_SCALE: i32 = 1000;
/// `MJ_AGAIN`
const MAJOR_AGAIN: i32 = 6;

impl SrtMinorError {
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Self::None,
            1 => Self::WriteUnavailable,
            2 => Self::ReadUnavailable,
            3 => Self::TransmissionTimeout,
            4 => Self::Congestion,
            other => Self::Other(other),
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            Self::None => 0,
            Self::WriteUnavailable => 1,
            Self::ReadUnavailable => 2,
            Self::TransmissionTimeout => 3,
            Self::Congestion => 4,
            Self::Other(other) => *other,
        }
    }

    /// Classify a full SRT error code. Only "try again" codes (6000-6999) would
    /// block; anything else is a hard failure and yields None.
    pub fn from_srt_error(code: i32) -> Option<Self> {
        if code.div_euclid(MAJOR_CODE_SCALE) == MAJOR_AGAIN {
            Some(Self::from_i32(code.rem_euclid(MAJOR_CODE_SCALE)))
        } else {
            None
        }
    }

    /// The full SRT error code for this condition. None when the minor code
    /// does not fit in 0-999, as SRT could never have reported it.
    pub fn as_srt_error(&self) -> Option<i32> {
        let minor = self.as_i32();
        if (0..MAJOR_CODE_SCALE).contains(&minor) {
            Some(MAJOR_AGAIN * MAJOR_CODE_SCALE + minor)
        } else {
            None
        }
    }
}

impl std::fmt::Display for SrtMinorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SrtMinorError::None => write!(f, "none"),
            SrtMinorError::WriteUnavailable => write!(f, "write unavailable"),
            SrtMinorError::ReadUnavailable => write!(f, "read unavailable"),
            SrtMinorError::TransmissionTimeout => write!(f, "transmission timeout"),
            SrtMinorError::Congestion => write!(f, "congestion"),
            SrtMinorError::Other(other) => write!(f, "minor error {other}"),
        }
    }
}
