//! Value objects shared across the domain

mod stay_window;

pub use stay_window::StayWindow;
