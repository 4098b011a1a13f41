//! Thin HTTP adapter (§6.1) translating the logical `StartInterview` /
//! `SubmitAnswer` API onto [`interview_service::InterviewService`]. No
//! business logic lives here — only request/response (de)serialization and
//! error-code mapping (§6.5), grounded on the teacher's
//! `crates/server/src/http.rs` router shape.

pub mod http;

pub use http::{create_router, AppState};
