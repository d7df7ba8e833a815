//! Device registry
//!
//! This module handles:
//! - Cataloguing known devices by path
//! - Owning each device's property store
//! - Seeding devices and properties directly, bypassing the dispatcher

mod device;
mod manager;

pub use device::{Device, DeviceKind};
pub use manager::DeviceRegistry;
