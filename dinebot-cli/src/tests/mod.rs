//! Unit tests for dinebot-cli, organized by module.
//!
//! Each submodule documents the behaviour under test.

mod run;
