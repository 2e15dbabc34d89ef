//! 统一的应用状态。

use std::sync::Arc;

use storage_capabilities::SpaceProbe;

use crate::config::ServerConfig;

/// 统一的应用状态，包含所有路由共享的数据。
#[derive(Clone)]
pub struct AppState {
    /// 剩余空间采样器。
    pub probe: Arc<SpaceProbe>,
}

impl AppState {
    /// 根据服务配置创建应用状态。
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            probe: Arc::new(SpaceProbe::new(config.home_var.clone())),
        }
    }
}
