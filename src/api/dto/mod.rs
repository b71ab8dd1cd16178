//! Data Transfer Objects for REST request/response serialization.
//!
//! All wire fields are camelCase; domain structs stay snake_case.

pub mod offer_dto;
pub mod rating_dto;
pub mod reservation_dto;

pub use offer_dto::*;
pub use rating_dto::*;
pub use reservation_dto::*;
