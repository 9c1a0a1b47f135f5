pub mod cancel;
pub mod core;
pub mod http;

#[cfg(test)]
pub(crate) mod mock;
