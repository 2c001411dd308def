//! # pmoguide - TV guide catalog for PMOTV
//!
//! `pmoguide` holds the in-memory catalog of television channels and their
//! daily broadcast grids, and resolves "what is on right now, and what
//! comes next" for any channel.
//!
//! ## Features
//!
//! - **Static Catalog**: channels, group memberships and full-day program
//!   grids, validated once at load time and immutable afterwards
//! - **Schedule Resolution**: maps a wall-clock instant onto the recurring
//!   daily grid, anchoring current/next slots to concrete calendar dates
//!   across the midnight wraparound
//! - **Group Queries**: derived group list (with the synthetic `"all"`
//!   pseudo-group) and per-group channel line-ups
//! - **REST API** (feature `pmoserver`): axum handlers plus an extension
//!   trait for `pmoserver::Server`, with OpenAPI documentation
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pmoguide::Catalog;
//!
//! let catalog = Catalog::builtin();
//! let now = NaiveDate::from_ymd_opt(2025, 3, 14)
//!     .unwrap()
//!     .and_hms_opt(21, 15, 0)
//!     .unwrap();
//!
//! let window = catalog.channel_program("one", now).unwrap();
//! println!("Now: {} (until {})", window.current.name, window.current.end_time);
//! println!("Next: {}", window.next.name);
//! ```
//!
//! ## Invariants
//!
//! Every channel's grid is non-empty, ordered, contiguous and covers
//! exactly one full day: the first slot starts at `"00:00:00"` and the
//! last slot ends at `"00:00:00"` (end-of-day). [`Catalog::new`] rejects
//! anything else, which is what lets the resolver treat a failed scan as a
//! hard [`Error::ScheduleGap`](error::Error::ScheduleGap) instead of
//! guessing a fallback.

pub mod catalog;
pub mod error;
pub mod models;
pub mod schedule;

#[cfg(feature = "pmoserver")]
pub mod api_rest;
#[cfg(feature = "pmoserver")]
pub mod openapi;
#[cfg(feature = "pmoserver")]
pub mod pmoserver_ext;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use models::{
    Channel, ChannelListing, Group, Program, ProgramWindow, ResolvedProgram, ALL_GROUP,
};
pub use schedule::resolve_current_and_next;

#[cfg(feature = "pmoserver")]
pub use api_rest::{create_router, TvGuideState};
#[cfg(feature = "pmoserver")]
pub use pmoserver_ext::TvGuideExt;
