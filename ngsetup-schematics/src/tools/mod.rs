//! The tool rules a run can install.

pub mod eslint;
pub mod lefthook;
pub mod prettier;
pub mod vitest;
