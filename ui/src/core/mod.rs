//! Platform-neutral helpers shared by the views.

pub mod format;
pub mod language;
pub mod platform;
pub mod storage;
pub mod timing;
