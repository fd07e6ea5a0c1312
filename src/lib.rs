pub mod chart;
pub mod cli;
pub mod ctx;
pub mod error;
pub mod groups;
pub mod input;
pub mod io;
pub mod letters;
pub mod manifest;
pub mod math;
pub mod pipeline;
pub mod schema;
