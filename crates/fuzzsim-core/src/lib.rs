//! # Fuzzsim Core
//!
//! Fuzzy inference engine and feature extractors for estimating the
//! similarity (0–100) of two grayscale images.
//!
//! The pipeline has four stages:
//!
//! - **Features** — mean-intensity difference and edge-map agreement
//! - **Membership** — Low / Medium / High partition of each variable
//! - **Rules** — Mamdani min/max inference over a fixed three-rule base
//! - **Defuzzification** — centroid of the aggregated output distribution
//!
//! ## Quick Start
//!
//! ```rust
//! use fuzzsim_core::prelude::*;
//!
//! let system = SimilaritySystem::new();
//!
//! let a = GrayGrid::uniform(10, 10, 100);
//! let b = GrayGrid::from_fn(10, 10, |x, _| if x < 5 { 90 } else { 140 });
//!
//! match system.compare(&a, &b).unwrap() {
//!     Comparison::Identical => println!("identical"),
//!     Comparison::Scored(inference) => println!("similarity {:.2}", inference.similarity),
//! }
//! ```

pub mod defuzz;
pub mod error;
pub mod features;
pub mod grid;
pub mod membership;
pub mod prelude;
pub mod rules;
pub mod system;
