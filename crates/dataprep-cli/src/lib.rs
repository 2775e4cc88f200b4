//! Library components for the dataprep CLI.

pub mod logging;
pub mod pipeline;
