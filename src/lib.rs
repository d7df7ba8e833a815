//! Network Device Handler
//!
//! Asynchronous property and action requests against network devices.
//! Requests are resolved against an in-memory [`registry::DeviceRegistry`]
//! and their outcome is delivered through a cooperatively drained
//! [`completion::CompletionChannel`].

pub mod completion;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod registry;

pub use completion::{reply, CompletionChannel, MessagePump};
pub use config::{DeviceSeed, HandlerConfig};
pub use dispatch::{DeviceProperties, RequestDispatcher, RequestId};
pub use error::{ErrorKind, RequestError, RequestResult};
pub use registry::{Device, DeviceKind, DeviceRegistry};
