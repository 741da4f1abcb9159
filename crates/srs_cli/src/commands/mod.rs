pub mod check;
pub mod history;
pub mod validate;
