// External API clients
pub mod rainbet;
