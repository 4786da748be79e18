//! Server-rendered web layer: handlers, templates, query parsing, feeds.

pub mod cards;
pub mod feeds;
pub mod handlers;
pub mod middleware;
pub mod query;
