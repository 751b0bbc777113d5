//! Status workflow rules.
//!
//! The permissive policy lets administrators pick any state directly. The strict
//! policy enforces a forward-only transition table.

use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;
use crate::models::DisasterStatus;

/// Which status transitions the store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPolicy {
    #[default]
    Permissive,
    Strict,
}

impl WorkflowPolicy {
    /// States reachable from `from` under this policy, excluding `from` itself.
    pub fn allowed_targets(&self, from: DisasterStatus) -> Vec<DisasterStatus> {
        use DisasterStatus::*;

        match self {
            WorkflowPolicy::Permissive => DisasterStatus::ALL
                .into_iter()
                .filter(|s| *s != from)
                .collect(),
            WorkflowPolicy::Strict => match from {
                Reported => vec![Reviewing, Responding, Resolved, Closed],
                Reviewing => vec![Responding, Resolved, Closed],
                Responding => vec![Resolved, Closed],
                // reopening a resolved incident sends it back to the field
                Resolved => vec![Responding, Closed],
                Closed => vec![],
            },
        }
    }

    /// Check a transition. Staying in the same state is always accepted.
    pub fn check(&self, from: DisasterStatus, to: DisasterStatus) -> Result<(), AppError> {
        if from == to {
            return Ok(());
        }

        let allowed = self.allowed_targets(from);
        if allowed.contains(&to) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition { from, to, allowed })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowPolicy::Permissive => "permissive",
            WorkflowPolicy::Strict => "strict",
        }
    }
}

impl FromStr for WorkflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(WorkflowPolicy::Permissive),
            "strict" => Ok(WorkflowPolicy::Strict),
            other => Err(format!("unknown workflow policy: {}", other)),
        }
    }
}

impl fmt::Display for WorkflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DisasterStatus::*;

    #[test]
    fn test_permissive_allows_any_pair() {
        let policy = WorkflowPolicy::Permissive;
        for from in DisasterStatus::ALL {
            for to in DisasterStatus::ALL {
                assert!(policy.check(from, to).is_ok(), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_strict_allows_forward_skips() {
        let policy = WorkflowPolicy::Strict;
        assert!(policy.check(Reported, Reviewing).is_ok());
        assert!(policy.check(Reported, Resolved).is_ok());
        assert!(policy.check(Responding, Closed).is_ok());
        assert!(policy.check(Resolved, Responding).is_ok());
    }

    #[test]
    fn test_strict_rejects_backwards_and_closed() {
        let policy = WorkflowPolicy::Strict;

        match policy.check(Responding, Reported) {
            Err(AppError::InvalidTransition { from, to, allowed }) => {
                assert_eq!(from, Responding);
                assert_eq!(to, Reported);
                assert_eq!(allowed, vec![Resolved, Closed]);
            }
            other => panic!("expected invalid transition, got {:?}", other),
        }

        for to in [Reported, Reviewing, Responding, Resolved] {
            assert!(policy.check(Closed, to).is_err());
        }
    }

    #[test]
    fn test_same_state_always_accepted() {
        assert!(WorkflowPolicy::Strict.check(Closed, Closed).is_ok());
        assert!(WorkflowPolicy::Permissive.check(Reported, Reported).is_ok());
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("Strict".parse::<WorkflowPolicy>(), Ok(WorkflowPolicy::Strict));
        assert_eq!(
            " permissive ".parse::<WorkflowPolicy>(),
            Ok(WorkflowPolicy::Permissive)
        );
        assert!("lenient".parse::<WorkflowPolicy>().is_err());
    }
}
