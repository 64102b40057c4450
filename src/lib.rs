pub mod engine;
pub mod error;
pub mod model;
pub mod ui;

#[cfg(test)]
mod test_support;
