pub mod class;
pub mod instance;
pub mod manifest;

pub use class::ProblemClass;
pub use instance::{InstanceFormat, ProblemInstance, SubFunction};
