//! Payment collaborator boundary.
//!
//! The payment SDK reports exactly one outcome per purchase attempt. Only a
//! completed payment starts a confirmation session — a cancelled or failed
//! sheet leaves the entitlement state untouched.

use tokio::sync::watch;
use tracing::{info, warn};

use crate::poller::{ActivationPoller, PollStatus, TerminalPredicate};
use crate::remote::RemoteSync;

/// Outcome reported by the payment processor's sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Completed,
    Canceled,
    Failed { reason: String },
}

/// Route a payment outcome into the engine. A completed payment starts a
/// confirmation session with the given terminal predicate (usually
/// `predicates::subscription_active`, or `predicates::user_seated` when the
/// purchase bundled a seat self-assignment) and returns its status stream;
/// any other outcome drops the predicate and starts nothing.
pub fn handle_payment_outcome<R: RemoteSync + 'static>(
    poller: &ActivationPoller<R>,
    outcome: PaymentOutcome,
    predicate: TerminalPredicate,
) -> Option<watch::Receiver<PollStatus>> {
    match outcome {
        PaymentOutcome::Completed => {
            info!("payment completed, starting activation confirmation");
            Some(poller.start(predicate))
        }
        PaymentOutcome::Canceled => {
            info!("payment cancelled by user, no confirmation needed");
            None
        }
        PaymentOutcome::Failed { reason } => {
            warn!(reason = %reason, "payment failed, no confirmation started");
            None
        }
    }
}
