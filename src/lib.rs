//! Folio: portfolio site behavior and newsletter relay.
//!
//! # Architecture
//!
//! ```text
//! Page (browser, `wasm` feature)
//!   │
//!   ├── Site (JS entry point)
//!   │     ├── typing driver ─────► TypingAnimator   (pure)
//!   │     ├── DomMenuHost ───────► MenuController / MenuMachine (pure)
//!   │     ├── LocalStorage ──────► ThemeController, subscribe::save_local
//!   │     ├── IntersectionObserver ► RevealTracker
//!   │     └── gloo-net fetch ────► repos / badges / resources parsers
//!   │
//!   └── POST {email} ──► Relay (native, `native` feature)
//!                          └── Dispatcher ──► repository-dispatch webhook
//! ```
//!
//! # Features
//!
//! - `native` - relay server, CLI, tokio + axum + reqwest (default)
//! - `wasm` - browser bindings: web-sys DOM, localStorage, fetch, timers
//!
//! # Usage
//!
//! ```
//! use folio::{RoleSequence, TypingAnimator};
//!
//! let mut animator = TypingAnimator::new(RoleSequence::new(["Dev"]).unwrap());
//! assert_eq!(animator.advance().text, "D");
//! assert_eq!(animator.advance().text, "De");
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod core;

// =============================================================================
// Native-only modules (relay server, CLI, tokio)
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod relay;
#[cfg(feature = "native")]
pub mod runtime;
#[cfg(feature = "native")]
pub mod server;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use core::config::SiteConfig;
pub use core::menu::{Key, MenuController, MenuEffect, MenuHost, MenuInput, MenuMachine, MenuState};
pub use core::store::{MemoryStore, PreferenceStore};
pub use core::theme::{Theme, ThemeController};
pub use core::typing::{AnimatorState, Frame, Mode, RoleSequence, TypingAnimator, TypingConfig};

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use relay::{Dispatcher, RelayConfig, RelayError};
#[cfg(feature = "native")]
pub use runtime::{install_signal_handlers, Shutdown};
#[cfg(feature = "native")]
pub use server::{create_router, create_router_with_name};

// =============================================================================
// Re-exports: WASM
// =============================================================================
#[cfg(feature = "wasm")]
pub use wasm::{DomMenuHost, LocalStorage, Site};
