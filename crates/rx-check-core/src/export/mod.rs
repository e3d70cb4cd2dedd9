//! Export module for printable patient summaries.

mod instructions;

pub use instructions::*;
