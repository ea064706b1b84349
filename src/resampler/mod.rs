//! Sample rate conversion from the tube rate to the output rate.

pub mod kaiser;
pub mod rate_converter;
pub mod time_register;

pub use rate_converter::RateConverter;
