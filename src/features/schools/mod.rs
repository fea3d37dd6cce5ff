//! School registry with proximity listing.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/addSchool` | Validate and store a school |
//! | GET | `/listSchools?latitude=&longitude=` | All schools, nearest first |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::MySqlSchoolRepository;
pub use services::SchoolService;
