mod args;
pub mod display;

pub use args::Args;
