pub mod constants;
pub mod reference;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
