//! Request dispatch for device property and action requests
//!
//! This module handles:
//! - Issuing get/set/action requests against the device registry
//! - Resolving each request to exactly one outcome
//! - Scheduling outcomes on the completion channel in issue order
//! - Tracking requests until their continuation has been delivered

mod dispatcher;
pub mod handlers;

pub use dispatcher::{DeviceProperties, Operation, PendingRequest, RequestDispatcher, RequestId};
