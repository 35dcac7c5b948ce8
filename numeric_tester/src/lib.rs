pub mod config;
pub mod dot_product;
pub mod eft;
pub mod exact;
pub mod float;
pub mod generator;
pub mod genus;
pub mod harness;
pub mod quadric;
pub mod report;
pub mod runner;
pub mod stats;
pub mod suite;
pub mod timer;

pub use exact::ExactNumber;
pub use float::WorkingFloat;
pub use harness::{Algorithm, NumericTest, TestCase};
