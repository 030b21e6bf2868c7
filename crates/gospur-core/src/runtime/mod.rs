//! External toolchain management
//!
//! The generated project is a Go module; `go mod init` runs through
//! [`Toolchain`].

pub mod tool;

pub use tool::Toolchain;
