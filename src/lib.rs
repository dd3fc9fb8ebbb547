//! Incremental UI state synchronization for A2UI streams.
//!
//! A remote generator streams small protocol envelopes describing a UI.
//! This crate validates and repairs the components they carry, stages
//! component and data-model changes, and promotes them atomically into a
//! committed, render-ready surface on `beginRendering`, pacing the work to
//! display frames.

pub mod component;
pub mod config;
pub mod data_model;
pub mod driver;
pub mod logging;
pub mod mvi;
pub mod protocol;
pub mod scheduler;
pub mod session;
pub mod surface;
pub mod transport;
