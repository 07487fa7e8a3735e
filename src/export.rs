//! Pure exporters from [`WgConfig`](crate::wg::config::WgConfig) to the
//! formats other proxy tools import. None of them do I/O.

pub mod link;
pub mod profile;
pub mod raw;
pub mod singbox;
pub mod summary;
