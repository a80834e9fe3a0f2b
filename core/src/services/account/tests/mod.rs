//! Unit tests for the account service.

pub mod mocks;
