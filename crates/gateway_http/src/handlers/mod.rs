//! HTTP request handlers

pub mod auth;
pub mod camera;
pub mod health;
pub mod ptz;
