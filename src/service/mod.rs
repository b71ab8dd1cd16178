//! Business logic between the HTTP layer and the store.

pub mod feed_service;
pub mod rating_service;
pub mod reservation_service;

pub use feed_service::FeedService;
pub use rating_service::RatingService;
pub use reservation_service::ReservationService;
