//! UseCase layer: the shared chat hub coordinating registry, history and delivery.

pub mod hub;

pub use hub::{ChatHub, DeliveryReport, Outlet};
