//! Prakruti assessment scoring, constitution classification and Ayurvedic
//! diet plan composition.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
