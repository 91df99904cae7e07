//! Request extractors: the request-scoped database session and the JSON body.

pub mod json;
pub mod session;

pub use json::JsonBody;
pub use session::DbSession;
