pub mod json;
mod session;
