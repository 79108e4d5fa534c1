#![warn(missing_docs)]
//! Core data types for the Van Westendorp Price Sensitivity Meter.
//!
//! A survey asks every respondent four price questions (too cheap, cheap,
//! expensive, too expensive). From the answers we build cumulative curves over
//! a shared price axis and read four price points off their intersections.
//! This crate holds the validated models for that pipeline, along with the
//! [`ports::Intersector`] trait that algorithm crates implement.

/// Domain models for price sensitivity analysis.
///
/// The models are plain data with validating constructors: once a
/// [`models::ResponseSet`], [`models::PriceAxis`] or [`models::Curve`] exists,
/// its invariants hold and downstream code does not need to re-check them.
pub mod models;

/// Interface traits for price sensitivity analysis.
///
/// These are the seams between the models and the algorithms that operate on
/// them, allowing intersection strategies to be swapped without touching the
/// orchestration code.
pub mod ports;
