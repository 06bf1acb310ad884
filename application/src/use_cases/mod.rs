//! Use cases for the application layer

pub mod coordinate;
pub mod gather_responses;
pub mod route_advisors;
pub mod single_flight;

#[cfg(test)]
pub(crate) mod test_support;
