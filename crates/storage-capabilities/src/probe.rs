//! 剩余空间采样与报告组装。
//!
//! 对临时目录（以及可解析时的 home 目录）并排执行受管/原生两条查询，
//! 并把结果渲染成固定格式的文本报告。

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::diskspace::{FreeSpaceProvider, ManagedFreeSpace, Result};
use crate::env::resolve_home_folder;

/// home 目录配置的默认值。
pub const DEFAULT_HOME_VAR: &str = "%HOME%";

const NEWLINE: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// 单个目录的两路采样结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderSpace {
    /// 被采样的目录。
    pub path: String,
    /// 受管路径报告的可用字节数。
    pub managed_bytes: u64,
    /// 原生路径报告的可用字节数。
    pub native_bytes: u64,
}

/// 一次完整采样的结果，临时目录必有，home 目录可缺席。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceReport {
    /// 临时目录的采样结果。
    pub temp: FolderSpace,
    /// home 目录的采样结果，配置无法解析时缺席。
    pub home: Option<FolderSpace>,
    /// 用于解析 home 目录的环境变量模板。
    pub home_var: String,
}

impl SpaceReport {
    /// 渲染为固定格式的文本报告。
    ///
    /// home 缺席时在临时目录行之后直接接上 `No home env var.`，不换行。
    pub fn render(&self) -> String {
        let mut report = format!(
            "Get temp folder available space by managed API: {} and by native API: {}.",
            self.temp.managed_bytes, self.temp.native_bytes
        );

        match &self.home {
            Some(home) => {
                report.push_str(NEWLINE);
                report.push_str(&format!(
                    "Get {} folder available space by managed API: {} and by native API: {}.",
                    self.home_var, home.managed_bytes, home.native_bytes
                ));
            }
            None => report.push_str("No home env var."),
        }

        report
    }
}

/// 剩余空间采样器，持有受管/原生两条查询路径。
pub struct SpaceProbe {
    managed: Box<dyn FreeSpaceProvider>,
    native: Box<dyn FreeSpaceProvider>,
    home_var: String,
}

impl SpaceProbe {
    /// 使用平台默认的两条查询路径创建采样器。
    pub fn new(home_var: impl Into<String>) -> Self {
        Self {
            managed: Box::new(ManagedFreeSpace),
            native: default_native_provider(),
            home_var: home_var.into(),
        }
    }

    /// 使用注入的查询路径创建采样器。
    pub fn with_providers(
        managed: Box<dyn FreeSpaceProvider>,
        native: Box<dyn FreeSpaceProvider>,
        home_var: impl Into<String>,
    ) -> Self {
        Self {
            managed,
            native,
            home_var: home_var.into(),
        }
    }

    /// 采样临时目录，并在 home 配置可解析时一并采样 home 目录。
    pub fn collect(&self) -> Result<SpaceReport> {
        let temp_dir = std::env::temp_dir().display().to_string();
        let temp = self.sample(temp_dir)?;

        let home = match resolve_home_folder(&self.home_var) {
            Some(home_dir) => Some(self.sample(home_dir)?),
            None => None,
        };

        Ok(SpaceReport {
            temp,
            home,
            home_var: self.home_var.clone(),
        })
    }

    /// 对单个目录先后执行受管/原生两条查询。
    fn sample(&self, path: String) -> Result<FolderSpace> {
        info!(path = %path, "Sampling folder free space");

        let managed_bytes = self.managed.available_bytes(&path)?;
        let native_bytes = self.native.available_bytes(&path)?;

        Ok(FolderSpace {
            path,
            managed_bytes,
            native_bytes,
        })
    }
}

#[cfg(any(unix, windows))]
fn default_native_provider() -> Box<dyn FreeSpaceProvider> {
    Box::new(crate::diskspace::NativeFreeSpace::new())
}

// 缺少原生磁盘空间原语的平台退化为两条路径都走受管查询。
#[cfg(not(any(unix, windows)))]
fn default_native_provider() -> Box<dyn FreeSpaceProvider> {
    Box::new(ManagedFreeSpace)
}
