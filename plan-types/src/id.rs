/// Compact id used to name every node in a plan.
///
/// The source library narrows this to 8 bits on constrained targets; a
/// general host has no such pressure so this workspace fixes it at 16 bits.
pub type ElementId = u16;

/// Reserved id meaning "no child" / "no parent" / "cursor at rest".
pub const NO_ELEMENT: ElementId = 0;
