//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain. Currently a single
//! REST interface built on axum; see [`rest`].

pub mod rest;
