//! Informational module - dashboard view model and user notifications

pub mod display;
pub mod notifications;
