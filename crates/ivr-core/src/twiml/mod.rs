//! Voice response documents
//!
//! Typed builder for the XML markup the telephony provider executes after
//! each webhook. Documents are assembled from verbs and rendered in one step,
//! so the call flow never touches serialization details.

mod builder;
mod writer;

pub use builder::{GatherOptions, RecordOptions, Trim, Verb, VoiceResponse};
