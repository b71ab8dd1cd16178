//! # reserva-gateway
//!
//! REST backend for a local outlet-deals marketplace: publishers post
//! offers, subscribers reserve them, publishers confirm or cancel, and
//! subscribers rate publishers after a confirmed hand-off.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ReservationService / RatingService / FeedService (service/)
//!     ├── NotificationDispatcher → Resend (notify/)
//!     ├── IdentityGateway → external auth provider (identity/)
//!     │
//!     └── MarketStore → PostgreSQL (store/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod identity;
pub mod notify;
pub mod service;
pub mod store;
