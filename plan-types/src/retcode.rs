/// The 2-bit outcome every node returns to its caller.
///
/// Mirrors the source's `INSTINCT_FAIL`/`INSTINCT_SUCCESS`/
/// `INSTINCT_IN_PROGRESS`/`INSTINCT_ERROR` ordinals exactly, since these
/// values round-trip through the text command grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    Fail = 0,
    Success = 1,
    InProgress = 2,
    Error = 3,
}

impl ReturnCode {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Fail),
            1 => Some(Self::Success),
            2 => Some(Self::InProgress),
            3 => Some(Self::Error),
            _ => None,
        }
    }
}

/// A return code plus an opaque payload, propagated unmodified up the
/// call chain by everything above the Action that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Return {
    pub code: ReturnCode,
    pub data: u32,
}

impl Return {
    pub fn new(code: ReturnCode) -> Self {
        Self { code, data: 0 }
    }

    pub fn with_data(code: ReturnCode, data: u32) -> Self {
        Self { code, data }
    }

    pub fn is_success(&self) -> bool {
        self.code == ReturnCode::Success
    }

    pub fn is_in_progress(&self) -> bool {
        self.code == ReturnCode::InProgress
    }

    pub fn is_fail(&self) -> bool {
        self.code == ReturnCode::Fail
    }

    pub fn is_error(&self) -> bool {
        self.code == ReturnCode::Error
    }

    /// Reinterprets the code, keeping the original payload — the Rust
    /// analogue of `INSTINCT_RTN_COMBINE`.
    pub fn with_code(self, code: ReturnCode) -> Self {
        Self { code, ..self }
    }
}

impl From<ReturnCode> for Return {
    fn from(code: ReturnCode) -> Self {
        Return::new(code)
    }
}
