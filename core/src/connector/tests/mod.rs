//! Tests for connector configuration and resolver adapters
