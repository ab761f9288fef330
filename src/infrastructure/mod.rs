pub mod media;
pub mod notification;
pub mod observability;
pub mod persistence;
pub mod storage;
pub mod vision;
