pub mod errors;
pub mod headline;
pub mod report;
pub mod scoring;

pub use errors::*;
pub use headline::*;
pub use report::*;
pub use scoring::*;
