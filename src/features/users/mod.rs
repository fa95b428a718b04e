//! User-facing views over accounts owned by the external auth service.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users/my-ads` | Caller's own listings (`status`, `page`, `limit`) |
//! | GET | `/api/users/profile` | Caller's profile |
//! | PUT | `/api/users/profile` | Update name, phone, location or avatar |

pub mod directory;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use directory::PgUserDirectory;
pub use services::UserProfileService;
