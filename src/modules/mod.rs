//! Infrastructure shared by the features: photo storage and realtime change feeds

pub mod realtime;
pub mod storage;
