//! sourtop: a local system monitor rendered as a refreshing terminal dashboard.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod logging;
pub mod rank;
pub mod rate;
pub mod render;
pub mod ui;

pub use sourtop_sampler as sampler;
