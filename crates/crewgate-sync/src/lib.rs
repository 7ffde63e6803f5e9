//! # crewgate-sync
//!
//! The asynchronous half of the Crewgate entitlement engine: everything that
//! talks to the remote billing backend or waits on it.
//!
//! - **remote** — the `RemoteSync` boundary trait
//! - **allocator** — optimistic seat mutations and the full-set batch commit
//! - **poller** — bounded fixed-interval confirmation loop, cancellable
//! - **payment** — entry point for payment-sheet outcomes
//! - **testing** — scripted `RemoteSync` double for tests

pub mod allocator;
pub mod payment;
pub mod poller;
pub mod remote;
pub mod testing;

pub use allocator::SeatAllocator;
pub use payment::{handle_payment_outcome, PaymentOutcome};
pub use poller::{
    predicates, ActivationPoller, PollParams, PollStatus, PredicateOutcome, TerminalPredicate,
};
pub use remote::RemoteSync;
