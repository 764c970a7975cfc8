//! Typed messages for actor communication

use ractor::{Message, RpcReplyPort};

/// Messages for the TurnDriver actor
#[derive(Debug)]
pub enum TurnDriverMessage {
    /// Advance the clock by one tick
    Tick { reply: RpcReplyPort<TickOutcome> },
    /// Report the driver's progress
    Status { reply: RpcReplyPort<DriverStatus> }
}

/// Result of a tick request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock moved to the contained tick
    Advanced(u64),
    /// The driver's tick budget is spent; the clock stays at the contained tick
    LimitReached(u64)
}

/// Driver progress information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverStatus {
    pub tick:      u64,
    pub driven:    u64,
    pub max_ticks: u64
}

// Implement Message trait for Ractor
impl Message for TurnDriverMessage {}
