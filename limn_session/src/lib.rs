// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-session orchestration for Limn.
//!
//! A [`Session`] owns one user's live component tree, its change log, the
//! installed depictors, and the session environment, and exposes the two
//! request entry points: [`Session::handle_ajax`] for incremental patch
//! cycles and [`Session::handle_full_page`] for plain GET/POST requests.
//! All work for a session runs under the coarse per-request lock of its
//! [`SessionHandle`].
//!
//! ```
//! use limn_model::{LABEL, PANEL};
//! use limn_session::{AjaxRequest, Session};
//!
//! let mut session = Session::new();
//! let root = session.root();
//! let panel = session.insert(root, &PANEL).unwrap();
//! session.insert(panel, &LABEL).unwrap();
//!
//! // The structural change dirtied the root, so the cycle asks for a
//! // whole-page reload.
//! let request = AjaxRequest {
//!     path: "/app",
//!     cookies: &[],
//!     document: "<events/>",
//! };
//! let response = session.handle_ajax(&request).unwrap();
//! assert!(response.body.contains("<reload/>"));
//! ```

#![forbid(unsafe_code)]

mod cookies;
mod dispatch;
mod error;
mod page;
mod session;

pub use cookies::{Environment, SESSION_COOKIE, SetCookie, reconcile_cookies};
pub use error::SessionError;
pub use page::{PageRequest, PageResponse, PostBody};
pub use session::{AjaxRequest, AjaxResponse, Delegate, Navigation, Session, SessionHandle};
