//! Core of the kite editor.
//!
//! Rows of raw bytes with cached render/highlight forms, the document that
//! owns them, incremental search with a transient match overlay, and the
//! editing session that ties cursor, viewport and search together. Terminal
//! IO, file IO and key decoding live in the client.

pub mod config;
pub mod document;
pub mod editor;
pub mod input;
pub mod messages;
pub mod movement;
pub mod position;
pub mod render;
pub mod row;
pub mod search;
pub mod syntax;
pub mod view;
