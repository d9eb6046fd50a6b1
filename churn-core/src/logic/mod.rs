//! Logic Module - Core churn prediction logic

pub mod config;
pub mod artifacts;
pub mod features;
pub mod model;
pub mod predictor;
