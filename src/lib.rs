pub mod discovery;
pub mod reference;
pub mod report;
pub mod schema;
pub mod validation;
