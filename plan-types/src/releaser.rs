/// Comparator applied by a [`Releaser`] to a sense reading.
///
/// `Tr`/`Fl` are the unconditional forms used for Drives and CEs that
/// should always (or never) fire regardless of any sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Gt,
    Lt,
    Tr,
    Fl,
}

impl Comparator {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Eq),
            1 => Some(Self::Ne),
            2 => Some(Self::Gt),
            3 => Some(Self::Lt),
            4 => Some(Self::Tr),
            5 => Some(Self::Fl),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::Eq => 0,
            Self::Ne => 1,
            Self::Gt => 2,
            Self::Lt => 3,
            Self::Tr => 4,
            Self::Fl => 5,
        }
    }
}

/// A sense-based predicate gating execution of a Drive or Competence
/// Element, with hysteresis and a wider "flex latch" band used while the
/// owning Drive is `Interrupted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Releaser {
    pub sense_id: u16,
    pub comparator: Comparator,
    pub trigger: i32,
    pub hysteresis: i32,
    pub flex_latch_hysteresis: i32,
    /// Whether the previous evaluation of this releaser returned Success.
    /// Drives hysteresis for GT/LT on the *next* evaluation.
    pub runtime_released: bool,
}

impl Releaser {
    pub fn new(
        sense_id: u16,
        comparator: Comparator,
        trigger: i32,
        hysteresis: i32,
        flex_latch_hysteresis: i32,
    ) -> Self {
        Self {
            sense_id,
            comparator,
            trigger,
            hysteresis,
            flex_latch_hysteresis,
            runtime_released: false,
        }
    }
}
