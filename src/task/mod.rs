//! Follow-up task lifecycle management.
//!
//! Tasks are follow-up work items attached to job applications. This module
//! validates and stores new tasks, surfaces pending tasks due within a
//! calendar day, and performs the one-way `pending → completed` transition.
//! It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
