//! Observability - request IDs woven into spans and response headers.

mod request_id;

pub use request_id::RequestIdMiddleware;
