// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod geo;
pub mod nominatim_client;
pub mod resolver;
pub mod retry;
pub mod translate_client;

pub use nominatim_client::*;
pub use resolver::*;
pub use retry::*;
pub use translate_client::*;
