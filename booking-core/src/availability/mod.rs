//! Availability services — calendar gating, slot generation, quota split
//!
//! Three read paths over the same capacity data, each with its own
//! semantics: the calendar gate answers "open at all?", the slot
//! generator answers "which times, how many seats?" (with an
//! online-quota fallback), and the quota allocator answers "how many
//! seats per channel?". They are deliberately not unified.

pub mod calendar;
pub mod quota;
pub mod slots;

pub use calendar::CalendarGate;
pub use quota::QuotaAllocator;
pub use slots::SlotGenerator;
