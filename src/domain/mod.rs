//! Domain Layer
//!
//! Pure deploy logic: value objects, entities, ports and services.
//! Nothing in here shells out or touches the network directly.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
