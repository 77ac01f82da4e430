// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod emergency;
pub mod translation;

pub use emergency::*;
pub use translation::*;
