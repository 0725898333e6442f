use std::fmt;

/// Structural inconsistencies detected while applying a change-set.
///
/// None of these are recoverable by the caller; they indicate that the live
/// tree and the model disagree. Appliers log them, assert in debug builds, and
/// skip the offending step in release builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotsError {
    IndexOutOfRange { index: usize, len: usize },
    MissingComposite { item_index: usize, child_index: usize },
    CompositeMismatch { item_index: usize, expected: usize, found: usize },
    Detached,
}

impl fmt::Display for SpotsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotsError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            SpotsError::MissingComposite {
                item_index,
                child_index,
            } => write!(
                f,
                "no composite component mounted at item {item_index}, child {child_index}"
            ),
            SpotsError::CompositeMismatch {
                item_index,
                expected,
                found,
            } => write!(
                f,
                "item {item_index} expects {expected} composite children, found {found}"
            ),
            SpotsError::Detached => write!(f, "component was released"),
        }
    }
}

impl std::error::Error for SpotsError {}

/// Reports a guarded inconsistency: loud in debug builds, logged and skipped
/// in release builds.
pub(crate) fn report(context: &str, err: &SpotsError) {
    log::error!("{context}: {err}");
    debug_assert!(false, "{context}: {err}");
}
