//! Easel Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Easel parser and
//! executor. It includes:
//!
//! - **Commands**: The closed set of board instructions ([`command::Command`])
//! - **Colors**: Color parsing and comparison ([`color::Color`])
//! - **Geometry**: Positions and sizes on the board ([`geometry`] module)

pub mod color;
pub mod command;
pub mod geometry;
