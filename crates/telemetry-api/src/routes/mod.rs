//! Route modules.

pub mod capture;
pub mod health;
pub mod home;
