// Core request model for the flagwire crates
// Requests, responses, typed extensions and the async middleware chain

pub mod error;
pub mod extensions;
pub mod http;
pub mod middleware;

pub use error::*;
pub use extensions::*;
pub use self::http::*;
pub use middleware::*;
