/// 6-bit mask over the dispatch events a node (or the global config) can
/// subscribe to: `{Executed, Success, Pending, Fail, Error, Sense}`.
///
/// Mirrors the source's per-node and global monitor masks exactly — a
/// bitset, not an enum, since a node may subscribe to any combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorFlags(u8);

impl MonitorFlags {
    pub const NONE: MonitorFlags = MonitorFlags(0);
    pub const EXECUTED: MonitorFlags = MonitorFlags(1 << 0);
    pub const SUCCESS: MonitorFlags = MonitorFlags(1 << 1);
    pub const PENDING: MonitorFlags = MonitorFlags(1 << 2);
    pub const FAIL: MonitorFlags = MonitorFlags(1 << 3);
    pub const ERROR: MonitorFlags = MonitorFlags(1 << 4);
    pub const SENSE: MonitorFlags = MonitorFlags(1 << 5);
    pub const ALL: MonitorFlags = MonitorFlags(0b0011_1111);

    pub fn from_bits(bits: u8) -> Self {
        MonitorFlags(bits & Self::ALL.0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, flag: MonitorFlags) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub fn union(self, other: MonitorFlags) -> MonitorFlags {
        MonitorFlags(self.0 | other.0)
    }

    /// A dispatch event fires the sink iff either the node's own mask or
    /// the engine-wide global mask has the bit set.
    pub fn fires(self, global: MonitorFlags, event: MonitorFlags) -> bool {
        self.contains(event) || global.contains(event)
    }
}

impl std::ops::BitOr for MonitorFlags {
    type Output = MonitorFlags;
    fn bitor(self, rhs: MonitorFlags) -> MonitorFlags {
        self.union(rhs)
    }
}
