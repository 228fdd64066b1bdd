//! Step definitions for task completion scenarios.
