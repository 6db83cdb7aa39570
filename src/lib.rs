// Library API shared by the `wordling` binary and its tests
pub mod constraint;
pub mod dictionary;
pub mod editor;
pub mod engine;
pub mod errors;
pub mod log;
pub mod pagination;
pub mod session;
