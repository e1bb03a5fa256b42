//! Pure calculation engines.
//!
//! Everything in here is a function of its inputs: no clock, no backend,
//! no logging. The submission paths call these and decide what to persist.

pub mod dividend;
pub mod holdings;
pub mod interest;
pub mod loan;
pub mod metals;
