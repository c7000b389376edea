//! Mirror outcome types.

use serde::Serialize;

/// Non-error result of a mirror operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MirrorOutcome {
    /// A mirror issue was created and linked.
    Mirrored {
        /// Key of the new issue.
        key: String,
    },

    /// The source already links to an issue in the target project.
    AlreadyMirrored {
        /// Key of the existing mirror.
        existing: String,
    },
}
