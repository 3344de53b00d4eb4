//! Request-level services.

mod validation;
pub use validation::RequestValidator;
