// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Limn Dirty: change-log primitives for incremental depiction.
//!
//! This crate provides the [`ChangeLog`], the collection that records which
//! depicted objects have observable state changes pending since the last
//! successful depiction. It is deliberately small:
//!
//! - **Marking** ([`ChangeLog::mark`]): property-change observation records a
//!   key; duplicate marks are absorbed.
//! - **Discovery order** ([`ChangeLog::iter`]): keys are yielded in the order
//!   they were first marked, because patch emission order is defined as
//!   discovery order.
//! - **Transactional drain** ([`ChangeLog::begin_drain`]): draining is a
//!   two-phase operation. The [`Drain`] guard takes the marked keys out, the
//!   caller serializes its patches, and only [`Drain::commit`] makes the
//!   removal permanent. Dropping an uncommitted guard restores every taken
//!   mark, so a failure mid-emission never silently loses dirtiness.
//!
//! ## Quick Start
//!
//! ```rust
//! use limn_dirty::ChangeLog;
//!
//! let mut log = ChangeLog::<u64>::new();
//! log.mark(3);
//! log.mark(7);
//! log.mark(3);
//!
//! // Emission succeeded: commit the drain.
//! let drain = log.begin_drain();
//! assert_eq!(drain.keys().collect::<Vec<_>>(), vec![3, 7]);
//! drain.commit();
//! assert!(log.is_empty());
//! ```
//!
//! ## Failed emission
//!
//! ```rust
//! use limn_dirty::ChangeLog;
//!
//! let mut log = ChangeLog::<u64>::new();
//! log.mark(3);
//!
//! // Guard dropped without commit: the mark survives for the next cycle.
//! drop(log.begin_drain());
//! assert!(log.is_dirty(3));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod log;

pub use log::{ChangeLog, Drain};
