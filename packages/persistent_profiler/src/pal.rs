//! Platform abstraction layer for the monotonic clock.
//!
//! Real timestamps come from the operating system via [`std::time::Instant`]. Unit tests
//! substitute a fake platform whose time only moves when the test says so.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
pub(crate) use real::RealPlatform;
