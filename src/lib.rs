//! GridFlux core engine: the reactive window-management control loop
//! described in `spec.md`. This crate has no concrete platform backend;
//! it only depends on the [`backend::PlatformBackend`] trait, matching the
//! spec's non-goal of owning X11/Win32 specifics.

pub mod backend;
pub mod collections;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod ipc;
pub mod layout;
pub mod manager;
pub mod signals;
pub mod window;
pub mod workspace;
