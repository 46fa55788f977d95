use crate::error::{DecodeError, EncodeError};
use crate::schema::Schema;

/// Core trait for per-view link codecs.
///
/// Every view codec must be able to:
/// 1.  `encode`: turn the view's state into a URL path.
/// 2.  `decode`: turn a URL path back into exactly that state, or reject it.
///
/// `decode` must never panic, whatever the input, and must never return a
/// partially restored state.
pub trait PathCodec {
    type State;

    /// Layout of the paths this codec reads and writes.
    fn schema(&self) -> &'static Schema;

    fn encode(&self, state: &Self::State) -> Result<String, EncodeError>;

    fn decode(&self, path: &str) -> Result<Self::State, DecodeError>;
}
