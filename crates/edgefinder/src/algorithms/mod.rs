pub mod boundary;
pub mod assembly;
pub mod dedup;
pub mod classification;
pub mod simplification;

pub use boundary::*;
pub use assembly::*;
pub use dedup::*;
pub use classification::*;
pub use simplification::*;
