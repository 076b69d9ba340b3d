//! Pure transition function from gateway status to order status.
//!
//! The (current order status, transaction_status, fraud_status) triple maps
//! to a new order status and a fulfillment decision. Keeping this a pure
//! function over enums makes the whole table testable without any I/O.

use crate::domain::gateway::{FraudStatus, TransactionStatus};

use super::status::OrderStatus;

/// Outcome of resolving a gateway status against an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Apply the new status; `fulfill` authorizes the paid side effects
    /// (library grants, revenue split, shipment trigger) as one unit.
    Transition {
        new_status: OrderStatus,
        fulfill: bool,
    },
    /// Unrecognized status vocabulary or a transition the order's current
    /// status does not allow: leave the order untouched and log.
    Hold,
}

impl Decision {
    fn to(new_status: OrderStatus) -> Self {
        Decision::Transition {
            new_status,
            fulfill: false,
        }
    }

    fn paid() -> Self {
        Decision::Transition {
            new_status: OrderStatus::Paid,
            fulfill: true,
        }
    }
}

/// Resolves the transition table against the order's current status.
///
/// | transaction_status | fraud_status | new status | fulfill |
/// |--------------------|--------------|------------|---------|
/// | capture            | accept       | paid       | yes     |
/// | capture            | challenge    | challenge  | no      |
/// | capture            | deny         | failed     | no      |
/// | settlement         | any          | paid       | yes     |
/// | pending            | any          | pending    | no      |
/// | deny, failure      | any          | failed     | no      |
/// | cancel, expire     | any          | expired    | no      |
/// | unrecognized       | any          | unchanged  | no      |
///
/// The table's outcome is then gated by the current status: `pending` may
/// move anywhere, `challenge` only to `paid` or `failed`, and the terminal
/// statuses (`paid`, `failed`, `expired`) accept nothing new. Re-confirming
/// the current status is always allowed, so a replayed settlement re-runs
/// the idempotent paid side effects instead of being held, while a stale or
/// anomalous gateway response can never regress a settled order.
///
/// A capture with a missing or unrecognized fraud status is held rather than
/// paid: funds are not confirmed until fraud review resolves.
pub fn decide(
    current: OrderStatus,
    transaction: Option<TransactionStatus>,
    fraud: Option<FraudStatus>,
) -> Decision {
    let candidate = match transaction {
        Some(TransactionStatus::Capture) => match fraud {
            Some(FraudStatus::Accept) => Decision::paid(),
            Some(FraudStatus::Challenge) => Decision::to(OrderStatus::Challenge),
            Some(FraudStatus::Deny) => Decision::to(OrderStatus::Failed),
            None => Decision::Hold,
        },
        Some(TransactionStatus::Settlement) => Decision::paid(),
        Some(TransactionStatus::Pending) => Decision::to(OrderStatus::Pending),
        Some(TransactionStatus::Deny) | Some(TransactionStatus::Failure) => {
            Decision::to(OrderStatus::Failed)
        }
        Some(TransactionStatus::Cancel) | Some(TransactionStatus::Expire) => {
            Decision::to(OrderStatus::Expired)
        }
        None => Decision::Hold,
    };

    match candidate {
        Decision::Transition { new_status, .. } if !allows(current, new_status) => Decision::Hold,
        other => other,
    }
}

/// Whether the current status permits moving to `next`.
///
/// Re-confirming the current status is always permitted (duplicate delivery
/// must be tolerated); beyond that, `pending` is open, `challenge` resolves
/// only to `paid` or `failed`, and terminal statuses admit no transition.
fn allows(current: OrderStatus, next: OrderStatus) -> bool {
    if current == next {
        return true;
    }
    match current {
        OrderStatus::Pending => true,
        OrderStatus::Challenge => matches!(next, OrderStatus::Paid | OrderStatus::Failed),
        OrderStatus::Paid | OrderStatus::Failed | OrderStatus::Expired => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn capture_accept_pays_and_fulfills() {
        assert_eq!(
            decide(
                OrderStatus::Pending,
                Some(TransactionStatus::Capture),
                Some(FraudStatus::Accept)
            ),
            Decision::Transition {
                new_status: OrderStatus::Paid,
                fulfill: true
            }
        );
    }

    #[test]
    fn capture_challenge_holds_for_review() {
        assert_eq!(
            decide(
                OrderStatus::Pending,
                Some(TransactionStatus::Capture),
                Some(FraudStatus::Challenge)
            ),
            Decision::Transition {
                new_status: OrderStatus::Challenge,
                fulfill: false
            }
        );
    }

    #[test]
    fn capture_deny_fails_without_fulfillment() {
        assert_eq!(
            decide(
                OrderStatus::Pending,
                Some(TransactionStatus::Capture),
                Some(FraudStatus::Deny)
            ),
            Decision::Transition {
                new_status: OrderStatus::Failed,
                fulfill: false
            }
        );
    }

    #[test]
    fn capture_without_fraud_status_is_held() {
        assert_eq!(
            decide(OrderStatus::Pending, Some(TransactionStatus::Capture), None),
            Decision::Hold
        );
    }

    #[test]
    fn settlement_pays_regardless_of_fraud_field() {
        assert_eq!(
            decide(OrderStatus::Pending, Some(TransactionStatus::Settlement), None),
            Decision::paid()
        );
        assert_eq!(
            decide(
                OrderStatus::Pending,
                Some(TransactionStatus::Settlement),
                Some(FraudStatus::Challenge)
            ),
            Decision::paid()
        );
    }

    #[test]
    fn pending_stays_pending() {
        assert_eq!(
            decide(OrderStatus::Pending, Some(TransactionStatus::Pending), None),
            Decision::Transition {
                new_status: OrderStatus::Pending,
                fulfill: false
            }
        );
    }

    #[test]
    fn deny_and_failure_fail() {
        for status in [TransactionStatus::Deny, TransactionStatus::Failure] {
            assert_eq!(
                decide(OrderStatus::Pending, Some(status), None),
                Decision::Transition {
                    new_status: OrderStatus::Failed,
                    fulfill: false
                }
            );
        }
    }

    #[test]
    fn cancel_and_expire_expire() {
        for status in [TransactionStatus::Cancel, TransactionStatus::Expire] {
            assert_eq!(
                decide(OrderStatus::Pending, Some(status), None),
                Decision::Transition {
                    new_status: OrderStatus::Expired,
                    fulfill: false
                }
            );
        }
    }

    #[test]
    fn unrecognized_status_is_held() {
        assert_eq!(decide(OrderStatus::Pending, None, None), Decision::Hold);
        assert_eq!(
            decide(OrderStatus::Pending, None, Some(FraudStatus::Accept)),
            Decision::Hold
        );
    }

    #[test]
    fn paid_order_holds_against_stale_pending() {
        assert_eq!(
            decide(OrderStatus::Paid, Some(TransactionStatus::Pending), None),
            Decision::Hold
        );
    }

    #[test]
    fn terminal_statuses_admit_no_new_transition() {
        for current in [OrderStatus::Paid, OrderStatus::Failed, OrderStatus::Expired] {
            assert_eq!(
                decide(current, Some(TransactionStatus::Cancel), None),
                if current == OrderStatus::Expired {
                    Decision::to(OrderStatus::Expired)
                } else {
                    Decision::Hold
                }
            );
            assert_eq!(
                decide(current, Some(TransactionStatus::Pending), None),
                Decision::Hold
            );
        }
    }

    #[test]
    fn replayed_settlement_reconfirms_paid_with_fulfillment() {
        assert_eq!(
            decide(OrderStatus::Paid, Some(TransactionStatus::Settlement), None),
            Decision::paid()
        );
    }

    #[test]
    fn challenge_resolves_only_to_paid_or_failed() {
        assert_eq!(
            decide(
                OrderStatus::Challenge,
                Some(TransactionStatus::Capture),
                Some(FraudStatus::Accept)
            ),
            Decision::paid()
        );
        assert_eq!(
            decide(
                OrderStatus::Challenge,
                Some(TransactionStatus::Capture),
                Some(FraudStatus::Deny)
            ),
            Decision::to(OrderStatus::Failed)
        );
        assert_eq!(
            decide(OrderStatus::Challenge, Some(TransactionStatus::Pending), None),
            Decision::Hold
        );
        assert_eq!(
            decide(OrderStatus::Challenge, Some(TransactionStatus::Expire), None),
            Decision::Hold
        );
    }

    proptest! {
        /// Fulfillment is only ever authorized together with the paid status.
        #[test]
        fn fulfill_implies_paid(current in 0..5usize, txn in 0..8usize, fraud in 0..4usize) {
            let current = [
                OrderStatus::Pending,
                OrderStatus::Paid,
                OrderStatus::Challenge,
                OrderStatus::Failed,
                OrderStatus::Expired,
            ][current];
            let txn = [
                None,
                Some(TransactionStatus::Capture),
                Some(TransactionStatus::Settlement),
                Some(TransactionStatus::Pending),
                Some(TransactionStatus::Deny),
                Some(TransactionStatus::Cancel),
                Some(TransactionStatus::Expire),
                Some(TransactionStatus::Failure),
            ][txn];
            let fraud = [
                None,
                Some(FraudStatus::Accept),
                Some(FraudStatus::Deny),
                Some(FraudStatus::Challenge),
            ][fraud];

            if let Decision::Transition { new_status, fulfill } = decide(current, txn, fraud) {
                if fulfill {
                    prop_assert_eq!(new_status, OrderStatus::Paid);
                }
            }
        }

        /// A terminal order only ever re-confirms its own status.
        #[test]
        fn terminal_orders_never_change_status(current in 0..3usize, txn in 0..8usize, fraud in 0..4usize) {
            let current = [OrderStatus::Paid, OrderStatus::Failed, OrderStatus::Expired][current];
            let txn = [
                None,
                Some(TransactionStatus::Capture),
                Some(TransactionStatus::Settlement),
                Some(TransactionStatus::Pending),
                Some(TransactionStatus::Deny),
                Some(TransactionStatus::Cancel),
                Some(TransactionStatus::Expire),
                Some(TransactionStatus::Failure),
            ][txn];
            let fraud = [
                None,
                Some(FraudStatus::Accept),
                Some(FraudStatus::Deny),
                Some(FraudStatus::Challenge),
            ][fraud];

            if let Decision::Transition { new_status, .. } = decide(current, txn, fraud) {
                prop_assert_eq!(new_status, current);
            }
        }

        /// Strings outside the fixed vocabulary never produce a transition.
        #[test]
        fn arbitrary_strings_are_held(s in "[a-z_]{0,16}") {
            let txn = TransactionStatus::parse(&s);
            if txn.is_none() {
                prop_assert_eq!(decide(OrderStatus::Pending, txn, None), Decision::Hold);
            }
        }
    }
}
