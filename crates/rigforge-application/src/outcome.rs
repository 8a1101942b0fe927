//! Results of user actions that may be blocked, raced or degraded.

use rigforge_core::notice::Notice;
use rigforge_core::view::ViewState;

/// Where and against which build a gateway request was started.
///
/// A result is applied only while both still hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultTicket {
    pub generation: u64,
    pub view: ViewState,
}

/// What happened to a user action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<T> {
    /// The result was stored in the application state.
    Applied(T),
    /// A fallback was stored because the gateway failed.
    Degraded { value: T, notice: Notice },
    /// The build or view changed while waiting; nothing was stored.
    Discarded,
    /// A request of the same kind is still running.
    AlreadyPending,
    /// The action was refused before doing anything.
    Blocked(Notice),
    /// The action ran but produced nothing to store.
    Failed(Notice),
}

impl<T> ActionOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_) | Self::Degraded { .. })
    }

    /// The stored value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Applied(value) | Self::Degraded { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Degraded { notice, .. } | Self::Blocked(notice) | Self::Failed(notice) => {
                Some(notice)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let applied = ActionOutcome::Applied(3);
        assert!(applied.is_applied());
        assert_eq!(applied.value(), Some(&3));
        assert!(applied.notice().is_none());

        let degraded = ActionOutcome::Degraded {
            value: 1,
            notice: Notice::GatewayUnavailable,
        };
        assert!(degraded.is_applied());
        assert_eq!(degraded.notice(), Some(&Notice::GatewayUnavailable));

        let blocked: ActionOutcome<u8> = ActionOutcome::Blocked(Notice::SaveCancelled);
        assert!(!blocked.is_applied());
        assert!(blocked.value().is_none());
        assert!(!ActionOutcome::<u8>::Discarded.is_applied());

        let failed: ActionOutcome<u8> = ActionOutcome::Failed(Notice::CouldNotIdentify);
        assert_eq!(failed.notice(), Some(&Notice::CouldNotIdentify));
    }
}
