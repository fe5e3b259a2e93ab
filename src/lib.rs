//! walletmeta - network and metadata state for a NEO desktop wallet
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## State
//! - [`state`] - Metadata state, actions and the reducer
//! - [`selectors`] - Getters and the memoized network lookup
//! - [`store`] - Shared state cell and dispatch
//! - [`memo`] - Last-input memoization
//!
//! ## Domain Types
//! - [`network`] - Network descriptors and the fixed public networks
//! - [`explorer`] - Block explorer preference
//! - [`notification`] - User-facing notifications
//!
//! ## Side Effects & Collaborators
//! - [`effects`] - Version check, settings load and block height sync
//! - [`api`] - Wallet API traits and the HTTP client
//! - [`settings`] - Persisted settings store
//! - [`price`] - Currency preference
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// State
// ============================================================================
pub mod memo;
pub mod selectors;
pub mod state;
pub mod store;

// ============================================================================
// Domain Types
// ============================================================================
pub mod explorer;
pub mod network;
pub mod notification;

// ============================================================================
// Side Effects & Collaborators
// ============================================================================
pub mod api;
pub mod effects;
pub mod price;
pub mod settings;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
