//! Pure job requirement logic for RoleGate.
//!
//! This crate decides whether a character may take a role, independent of
//! any profile store, prototype registry, or localization backend. Functions
//! take plain data plus small lookup traits and return values, making them
//! unit-testable and safe to call from any number of threads.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`fixtures`] | Species collision fixtures and the primary-shape lookup |
//! | [`message`] | Reason messages and the injected renderer |
//! | [`profile`] | Character body-shape profile |
//! | [`requirement`] | Job requirement family and job definitions |
//! | [`validation`] | Load-time validation of species and job data |
//! | [`weight`] | Derived body weight and the weight gate |

pub mod fixtures;
pub mod message;
pub mod profile;
pub mod requirement;
pub mod validation;
pub mod weight;
