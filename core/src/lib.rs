//! # sglobal core
//!
//! Finds security groups whose inbound rules are open to the internet.
//!
//! * [`evaluator`]: which sources of a permission entry are risky.
//! * [`scanner`]: one region, all inventory pages.
//! * [`orchestrator`]: region resolution and the multi-region run.
//! * [`guard`]: timeout and cancellation for each provider call.
//! * [`aws`]: the AWS provider.

pub mod aws;
pub mod error;
pub mod evaluator;
pub mod guard;
pub mod orchestrator;
pub mod scanner;

pub use error::ScanError;
pub use guard::CallGuard;
pub use orchestrator::{RegionSelector, ScanOrchestrator};
