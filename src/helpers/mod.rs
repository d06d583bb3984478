pub mod harvest;
pub mod report;
pub mod slack;
