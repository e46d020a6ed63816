/// Password hashing, credential checks and the logged-in account extractor
pub mod auth;
/// Mapping of domain errors to HTTP responses
pub mod error_handling;
/// One-shot user notices carried in the session
pub mod flash;
