//! Storage Capabilities - 存储空间能力封装模块。
//!
//! 该 crate 提供受管/原生两条互相独立的磁盘剩余空间查询路径，
//! 供 server 集成为 API 路由，用于并排采样、交叉核对两条路径的结果。

pub mod diskspace;
pub mod env;
pub mod probe;

pub use diskspace::{
    DiskFreeSpace, DiskFreeSpaceCall, FreeSpaceError, FreeSpaceProvider, ManagedFreeSpace,
    NativeFreeSpace, Result,
};
pub use env::{
    expand_env_vars, expand_env_vars_with, resolve_home_folder, resolve_home_folder_with,
};
pub use probe::{DEFAULT_HOME_VAR, FolderSpace, SpaceProbe, SpaceReport};
