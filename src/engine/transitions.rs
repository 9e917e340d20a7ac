use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;
use crate::models::order::OrderStatus;

// Forward allows one step along the delivery path, or accepting from pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Forward,
}

impl TransitionPolicy {
    pub fn check(self, from: &OrderStatus, to: &OrderStatus) -> Result<(), AppError> {
        match self {
            TransitionPolicy::Permissive => Ok(()),
            TransitionPolicy::Forward => {
                if from == to || is_forward_step(from, to) {
                    Ok(())
                } else {
                    Err(AppError::Conflict(format!(
                        "transition from {from} to {to} is not allowed"
                    )))
                }
            }
        }
    }
}

fn is_forward_step(from: &OrderStatus, to: &OrderStatus) -> bool {
    matches!(
        (from, to),
        (OrderStatus::Pending, OrderStatus::AutoDispatch)
            | (OrderStatus::Pending, OrderStatus::Accepted)
            | (OrderStatus::AutoDispatch, OrderStatus::Accepted)
            | (OrderStatus::Accepted, OrderStatus::DriverAtPickup)
            | (OrderStatus::DriverAtPickup, OrderStatus::Picked)
            | (OrderStatus::Picked, OrderStatus::DriverAtDropoff)
            | (OrderStatus::DriverAtDropoff, OrderStatus::Completed)
    )
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "forward" => Ok(TransitionPolicy::Forward),
            other => Err(format!("unknown transition policy `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TransitionPolicy;
    use crate::error::AppError;
    use crate::models::order::OrderStatus;

    #[test]
    fn permissive_allows_anything() {
        let policy = TransitionPolicy::Permissive;
        assert!(policy.check(&OrderStatus::Completed, &OrderStatus::Pending).is_ok());
        assert!(policy.check(&OrderStatus::Pending, &OrderStatus::from("lost")).is_ok());
    }

    #[test]
    fn forward_accepts_the_delivery_path() {
        let policy = TransitionPolicy::Forward;
        let path = [
            OrderStatus::Pending,
            OrderStatus::AutoDispatch,
            OrderStatus::Accepted,
            OrderStatus::DriverAtPickup,
            OrderStatus::Picked,
            OrderStatus::DriverAtDropoff,
            OrderStatus::Completed,
        ];

        for step in path.windows(2) {
            assert!(policy.check(&step[0], &step[1]).is_ok(), "{} -> {}", step[0], step[1]);
        }
        assert!(policy.check(&OrderStatus::Pending, &OrderStatus::Accepted).is_ok());
    }

    #[test]
    fn forward_rejects_skips_and_rewinds() {
        let policy = TransitionPolicy::Forward;

        let skip = policy.check(&OrderStatus::Accepted, &OrderStatus::Completed);
        assert!(matches!(skip, Err(AppError::Conflict(_))));

        let rewind = policy.check(&OrderStatus::Picked, &OrderStatus::Accepted);
        assert!(matches!(rewind, Err(AppError::Conflict(_))));

        let unknown = policy.check(&OrderStatus::Pending, &OrderStatus::from("lost"));
        assert!(unknown.is_err());
    }

    #[test]
    fn forward_treats_same_status_as_allowed() {
        assert!(TransitionPolicy::Forward
            .check(&OrderStatus::Picked, &OrderStatus::Picked)
            .is_ok());
    }

    #[test]
    fn parses_from_config_strings() {
        assert_eq!("forward".parse::<TransitionPolicy>(), Ok(TransitionPolicy::Forward));
        assert_eq!(" Permissive ".parse::<TransitionPolicy>(), Ok(TransitionPolicy::Permissive));
        assert!("strict".parse::<TransitionPolicy>().is_err());
    }
}
