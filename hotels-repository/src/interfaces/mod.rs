//! This module defines and re-exports the interfaces of the permanent and indexed stores.

mod hotels;
mod locations;

pub use hotels::HotelRepository;
pub use locations::LocationRepository;
