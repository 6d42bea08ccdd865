//! HTTP surface tests
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`, one
//! unseeded server per test. Routes, status codes, and wire shapes for
//! all three revisions plus auth and health.

mod auth;
mod v0;
mod v01;
