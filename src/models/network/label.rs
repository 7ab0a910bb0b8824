use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// Size of one label stack entry on the wire.
pub const LABEL_LENGTH: usize = 3;

/// Label entry value that marks a withdrawal carrying no label (RFC 8277 section 2.4).
pub const WITHDRAW_LABEL: u32 = 0x80_0000;

const LABEL_VALUE_MASK: u32 = 0x000f_ffff;
const BOTTOM_OF_STACK: u32 = 0x01;

/// One MPLS label stack entry as carried in NLRI (RFC 3107 section 3).
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                Label                  | Exp |S|
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The bottom-of-stack bit is not stored: it is implied by the entry's position in a
/// [LabelStack].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MplsLabel {
    /// 20-bit label value
    pub value: u32,
    /// 3-bit experimental / traffic class bits
    pub traffic_class: u8,
}

/// Ordered label stack, outermost label first.
pub type LabelStack = SmallVec<[MplsLabel; 2]>;

impl MplsLabel {
    pub fn new(value: u32) -> Self {
        MplsLabel {
            value: value & LABEL_VALUE_MASK,
            traffic_class: 0,
        }
    }

    /// Split a 24-bit label stack entry into the label and its bottom-of-stack bit.
    pub fn from_entry(entry: u32) -> (Self, bool) {
        let label = MplsLabel {
            value: (entry >> 4) & LABEL_VALUE_MASK,
            traffic_class: ((entry >> 1) & 0x07) as u8,
        };
        (label, entry & BOTTOM_OF_STACK == BOTTOM_OF_STACK)
    }

    /// Pack the label into a 24-bit label stack entry.
    pub fn to_entry(&self, bottom: bool) -> u32 {
        let mut entry = ((self.value & LABEL_VALUE_MASK) << 4) | ((self.traffic_class as u32 & 0x07) << 1);
        if bottom {
            entry |= BOTTOM_OF_STACK;
        }
        entry
    }
}

impl Display for MplsLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
