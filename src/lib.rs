//! Generates the eclipse `.classpath`, `.project`, `.factorypath` and `.settings` files
//! for a bazel workspace, after building the jars eclipse needs to compile it.

pub mod api;
pub mod bazel;
pub mod config;
pub mod eclipse;
pub mod errors;
pub mod preview;
pub mod vfs;
pub mod workspace;
