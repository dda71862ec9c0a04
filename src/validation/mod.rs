mod dataset;
mod metadata;
mod result;
mod validator;


pub use result::{Stats, ValidationResult};
pub use validator::Validator;
