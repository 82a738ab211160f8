//! Value-transfer collaborator abstraction.

mod mock;
mod traits;

pub use mock::MockLedger;
pub use traits::ValueTransfer;
