//! Hash algorithm implementations.

mod average;
mod difference;
mod frequency;

pub use average::AverageHasher;
pub use difference::DifferenceHasher;
pub use frequency::FrequencyHasher;
