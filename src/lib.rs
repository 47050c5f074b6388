pub mod binder;
pub mod commands;
pub mod http;
pub mod index;
pub mod picker;
pub mod runtime;
pub mod serve;
