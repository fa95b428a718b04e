//! Classified listings ("ads").
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/ads` | - | Browse active listings |
//! | GET | `/api/ads/{id}` | - | Listing detail, counts a view |
//! | POST | `/api/ads` | JWT | Create a listing |
//! | PUT | `/api/ads/{id}` | JWT, owner | Update a listing |
//! | DELETE | `/api/ads/{id}` | JWT, owner | Delete a listing (`?mode=soft` keeps the row) |

pub mod dtos;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::ListingService;
pub use store::PgListingStore;
