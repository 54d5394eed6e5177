//! Client-side state components driven by the UI.
//!
//! DESIGN
//! ======
//! Each component exclusively owns the entities it fetched and is mutated
//! only through its own operations. Every async operation is split into pure
//! `begin_*`/`finish_*` transitions so the reactive frontend can apply the
//! same bookkeeping around its own browser requests, while native callers use
//! the async convenience methods that take a [`Gateway`](crate::Gateway).

pub mod conversation;
pub mod conversations;
pub mod query;

#[cfg(test)]
pub mod test_helpers;
