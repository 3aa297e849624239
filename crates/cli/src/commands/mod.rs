pub mod create;
pub mod delete;
pub mod fields;
pub mod get;
pub mod list;
pub mod update;
pub mod validate;
