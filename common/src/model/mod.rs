pub mod field;
pub mod report;
pub mod template;
