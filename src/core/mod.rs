pub mod error;
pub mod middleware;
pub mod response;
