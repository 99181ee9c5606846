//! Unit tests for the workspace store.
