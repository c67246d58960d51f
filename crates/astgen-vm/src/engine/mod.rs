//! Runtime engine: tree values, verification, dispatch and the reducer
//! family, the JSON codec and structural paths.

mod codec;
mod director;
mod error;
mod invariants;
mod path;
mod reducers;
mod value;
mod verify;

#[cfg(test)]
mod codec_tests;
#[cfg(test)]
mod director_tests;
#[cfg(test)]
mod path_tests;
#[cfg(test)]
pub(crate) mod test_utils;
#[cfg(test)]
mod verify_tests;

pub use codec::{DeserializeError, deserialize, serialize};
pub use director::{Director, Fields, Reduced, Reducer, Thunk, ThunkedDirector, ThunkedReducer};
pub use error::RuntimeError;
pub use path::Path;
pub use reducers::{
    Flattener, Monoid, Monoidal, RangeChecker, RangeError, Reconstructing, Span, flatten,
    fold_fields,
};
pub use value::{AstNode, Value};
pub use verify::{VerifyError, verify};
