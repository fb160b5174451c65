pub mod notification;
pub mod session;
pub mod workspace;
