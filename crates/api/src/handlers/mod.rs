//! HTTP request handlers, one module per resource.

pub mod event;
pub mod project;
pub mod report;
pub mod views;
