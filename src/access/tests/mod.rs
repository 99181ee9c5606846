//! Unit tests for the authorization policy.

mod policy_tests;
