pub mod judgments;
pub mod report;
pub mod scoring;
pub mod stats;
