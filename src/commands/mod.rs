pub mod parse;
pub mod rules;
pub mod sanitize;
pub mod scan;
