//! Hardware abstraction traits
//!
//! These traits define the interface between the chain controller and
//! whatever physically moves bits to the chips.

pub mod bus;

pub use bus::FrameBus;
