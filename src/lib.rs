//! NeuroLearn - adaptive learning backend
//!
//! Turns a learner's questionnaire answers into a validated learning profile
//! via an external inference service, and uses that profile to adapt content
//! and condition a learning assistant.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
