//! API 路由模块。
//!
//! 提供磁盘剩余空间诊断 API。

pub mod space;
pub mod state;

pub use space::create_space_router;
pub use state::AppState;
