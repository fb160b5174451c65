pub mod catalog;
pub mod hydration;
pub mod main;
pub mod mutation;
pub mod persist;
pub mod workspace;
