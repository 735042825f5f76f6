//! Issue mapping services: locating tool results, mapping annotations and
//! exposing providers through an explicit registry.

pub mod locator;
pub mod mapper;
pub mod provider;
pub mod registry;
pub mod tools;
