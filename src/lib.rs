//! # ticket-index
//!
//! Semantic search over support ticket exports.
//!
//! The `tix` binary builds a single-file embedding index from a ticketing
//! system's JSON export and serves top-k similarity queries against it.
//! Automated (bot) comments are filtered out before embedding so the index
//! only carries text from genuine participants.
//!
//! ```text
//! ┌──────────┐   ┌────────────────┐   ┌───────────┐
//! │  Corpus  │──▶│ Compose+Filter │──▶│  Encode   │──▶ tickets.index
//! │  (JSON)  │   │  (bot noise)   │   │ (asymm.)  │
//! └──────────┘   └────────────────┘   └───────────┘
//!                                           ▲
//!         query ──▶ encode_query ──▶ top-k ─┘──▶ rehydrate ──▶ JSON
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! tix build                        # build or refresh the index
//! tix search "device offline"      # top-5 results as JSON on stdout
//! tix search "wrong price" --limit 10
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`corpus`] | Ticket corpus loading |
//! | [`classify`] | Genuine-vs-bot comment classification |
//! | [`compose`] | Ticket → document composition |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`index`] | Index persistence and staleness |
//! | [`search`] | Top-k retrieval and rehydration |
//! | [`build_cmd`] | Build orchestration |
//! | [`progress`] | Diagnostics on stderr |

pub mod build_cmd;
pub mod classify;
pub mod compose;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod index;
pub mod models;
pub mod progress;
pub mod search;
