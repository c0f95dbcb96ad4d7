//! Moderation state machine
//!
//! A report's trust state is the product of three independent flags:
//! `flagged`, `verified` and `deleted` (terminal). Classification is a
//! separate label. This module decides what a transition does; the store
//! applies the resulting plan and its audit entry in one atomic write.

mod transition;

pub use transition::{
    plan_transition, ModerationAction, ModerationCommand, SkipReason, TransitionOutcome,
    TransitionPlan, DEFAULT_FLAG_REASON,
};
