//! Copper Fern Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing the router to be driven in tests without a running binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
