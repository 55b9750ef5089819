pub mod batch;
pub mod paginator;
pub mod window;
