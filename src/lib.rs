//! Followup: lifecycle management for job-application follow-up tasks.
//!
//! A task is a call, email, or review due at a given instant for one job
//! application. This crate validates and stores new tasks, lists the pending
//! tasks due within a calendar day, and marks tasks completed.
//!
//! # Architecture
//!
//! Followup follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task domain, store port and adapters, lifecycle service
//! - [`api`]: HTTP endpoints over the lifecycle service
//! - [`infrastructure`]: Configuration, logging, and server bootstrap

pub mod api;
pub mod infrastructure;
pub mod task;
