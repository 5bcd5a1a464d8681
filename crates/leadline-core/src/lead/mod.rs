//! Lead capture pipeline for Leadline.
//!
//! This module defines the post-processing stages every turn result
//! passes through, and the `LeadSink` trait the infrastructure layer
//! implements for webhook delivery:
//! - `LeadExtractor`: regex backstop filling lead fields the model missed
//! - `ResponseGuard`: replaces empty replies with a clarification
//! - `LeadNotifier`: fire-and-forget delivery of qualified leads

pub mod extract;
pub mod guard;
pub mod notify;
