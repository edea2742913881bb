//! Unit tests for SMS module

#[cfg(test)]
pub mod mocks;
#[cfg(test)]
pub mod mock_sms_tests;
