#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the gym-core crate.
//! [gym_core]: https://docs.rs/gym_core/latest/gym_core/index.html
#![doc = include_str!("../README.md")]

/// Core domain models for the gym management system.
///
/// This module contains the records returned by the repositories, the data
/// submitted by clients, and the validation that converts one into the other.
///
/// The models are plain data structures with minimal business logic, keeping
/// the domain separate from its persistence and transport implementations.
pub mod models;

/// Interface traits for the gym management system.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the domain logic and external
/// adapters (such as databases or HTTP servers) without specifying
/// implementation details.
pub mod ports;
