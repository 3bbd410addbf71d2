pub mod validation;

pub use validation::{validate_json, ValidatedJson, ValidatedQuery};
