pub mod builder;
pub mod defaults;
pub mod recorded;
pub mod runtime;
pub mod traits;
