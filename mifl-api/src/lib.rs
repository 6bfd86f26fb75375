//! # MIFL Team Site Library
//!
//! Web layer of the team site: routing, session handling and page payloads
//! on top of `mifl_shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `forms`: Submitted forms and their validation
//! - `middleware`: Security headers and session gating
//! - `pages`: JSON page payloads
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod pages;
pub mod routes;
