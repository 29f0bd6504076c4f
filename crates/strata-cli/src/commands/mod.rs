pub mod check;
pub mod compile;
pub mod manifest;

#[cfg(test)]
mod manifest_tests;
