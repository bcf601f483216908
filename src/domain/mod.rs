pub mod errors;
pub mod order;
pub mod ports;
pub mod pricing;
pub mod report;
