//! Load-more triggering for both content edges
//!
//! `trigger` holds the per-episode state machine (Idle -> Loading ->
//! cooldown -> Idle), `dispatcher` the background execution of the caller's
//! load callback and of the cooldown timer.

mod dispatcher;
mod trigger;

pub use dispatcher::{LoadCallback, LoadDispatcher, LoadingFlag, TokioDispatcher};
pub use trigger::{PaginationTrigger, TriggerSettings};
