//! Runtime errors.

use super::{DeserializeError, RangeError, VerifyError};

/// Failure while running generated semantics over a tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Deserialize(#[from] DeserializeError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("rewriting `{kind}` produced `{found}`, which does not fit `{expected}`")]
    Rewrite {
        kind: String,
        found: String,
        expected: String,
    },

    #[error(transparent)]
    Range(#[from] RangeError),
}
