#![forbid(unsafe_code)]

//! Runtime: the update/view loop and a deterministic simulator for tests.

pub mod program;
pub mod simulator;

pub use program::{Cmd, Model, Program, ProgramConfig};
pub use simulator::ProgramSimulator;
