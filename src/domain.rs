//! Domain module - courts, court families and site constants
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod constants;
pub mod court;
pub mod court_type;

pub use court::{
    CityDistrictCourtParams, Court, CourtDetails, CourtError, CourtParams, DistrictCourtParams,
    RegionalCourtParams,
};
pub use court_type::CourtFamily;
