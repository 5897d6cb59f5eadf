//! nightlight — read and change the Windows 10/11 Night Light state and strength.

pub mod config;
pub mod controller;
pub mod error;
pub mod record;
pub mod settings;
pub mod state;
pub mod store;

pub use controller::NightLight;
pub use error::NightLightError;
