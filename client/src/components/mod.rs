//! Reusable UI components.

pub mod notice;
