//! 磁盘剩余空间能力模块。
//!
//! 提供两条互相独立的剩余空间查询路径：受管路径解析目录所在的卷并报告
//! 该卷的可用空间，原生路径绕过高层抽象直接调用平台的磁盘空间原语。
//! 两条路径互不回退，供上层并排采样、交叉核对。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sysinfo::Disks;
use thiserror::Error;

/// 剩余空间查询错误类型。
#[derive(Debug, Error)]
pub enum FreeSpaceError {
    #[error("路径为空")]
    EmptyPath,

    #[error("路径无法传入系统调用: {0}")]
    InvalidPath(String),

    #[error("无法解析路径所在的卷: {0}")]
    VolumeNotFound(String),

    #[error("原生磁盘空间调用失败 (code {code}): {source}")]
    NativeCall {
        code: i32,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FreeSpaceError>;

/// 平台磁盘空间原语一次性报告的三元组。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskFreeSpace {
    /// 当前用户可用的字节数（计入配额）。
    pub available: u64,
    /// 卷的总字节数。
    pub total: u64,
    /// 卷的总剩余字节数（不计配额）。
    pub total_free: u64,
}

/// 底层磁盘空间系统调用的窄接口，测试时可注入假实现。
pub trait DiskFreeSpaceCall: Send + Sync {
    /// 查询 `dir`（已规范化为目录形式）所在卷的剩余空间三元组。
    fn disk_free_space(&self, dir: &str) -> Result<DiskFreeSpace>;
}

/// 平台系统调用实现。
#[cfg(any(unix, windows))]
pub struct OsDiskFreeSpaceCall;

#[cfg(unix)]
impl DiskFreeSpaceCall for OsDiskFreeSpaceCall {
    fn disk_free_space(&self, dir: &str) -> Result<DiskFreeSpace> {
        use std::ffi::CString;
        use std::mem::MaybeUninit;

        let c_dir =
            CString::new(dir).map_err(|_| FreeSpaceError::InvalidPath(dir.to_string()))?;
        let mut stat = MaybeUninit::<libc::statvfs>::uninit();

        let ret = unsafe { libc::statvfs(c_dir.as_ptr(), stat.as_mut_ptr()) };
        if ret != 0 {
            let source = std::io::Error::last_os_error();
            let code = source.raw_os_error().unwrap_or(ret);
            return Err(FreeSpaceError::NativeCall { code, source });
        }

        let stat = unsafe { stat.assume_init() };
        let frsize = stat.f_frsize as u64;
        Ok(DiskFreeSpace {
            available: stat.f_bavail as u64 * frsize,
            total: stat.f_blocks as u64 * frsize,
            total_free: stat.f_bfree as u64 * frsize,
        })
    }
}

#[cfg(windows)]
impl DiskFreeSpaceCall for OsDiskFreeSpaceCall {
    fn disk_free_space(&self, dir: &str) -> Result<DiskFreeSpace> {
        use std::ffi::OsStr;
        use std::iter;
        use std::os::windows::ffi::OsStrExt;

        use windows_sys::Win32::Foundation::GetLastError;
        use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

        if dir.contains('\0') {
            return Err(FreeSpaceError::InvalidPath(dir.to_string()));
        }

        let wide: Vec<u16> = OsStr::new(dir).encode_wide().chain(iter::once(0)).collect();

        let mut available = 0u64;
        let mut total = 0u64;
        let mut total_free = 0u64;

        let ok = unsafe {
            GetDiskFreeSpaceExW(wide.as_ptr(), &mut available, &mut total, &mut total_free)
        };
        if ok == 0 {
            let code = unsafe { GetLastError() } as i32;
            return Err(FreeSpaceError::NativeCall {
                code,
                source: std::io::Error::from_raw_os_error(code),
            });
        }

        Ok(DiskFreeSpace {
            available,
            total,
            total_free,
        })
    }
}

/// 剩余空间查询能力接口，受管/原生两条路径各自实现。
pub trait FreeSpaceProvider: Send + Sync {
    /// 返回 `path` 目录对当前用户可用的剩余字节数。
    fn available_bytes(&self, path: &str) -> Result<u64>;
}

/// 受管路径：解析路径所在的卷，报告该卷的可用空间。
///
/// 路径结尾带不带分隔符均可。
pub struct ManagedFreeSpace;

impl FreeSpaceProvider for ManagedFreeSpace {
    fn available_bytes(&self, path: &str) -> Result<u64> {
        let canonical = PathBuf::from(path)
            .canonicalize()
            .map_err(|_| FreeSpaceError::VolumeNotFound(path.to_string()))?;

        let disks = Disks::new_with_refreshed_list();
        longest_mount_match(
            &canonical,
            disks
                .list()
                .iter()
                .map(|disk| (disk.mount_point(), disk.available_space())),
        )
        .ok_or_else(|| FreeSpaceError::VolumeNotFound(canonical.display().to_string()))
    }
}

/// 在卷列表中选出挂载点为 `canonical` 最长前缀的卷，返回其可用字节数。
fn longest_mount_match<'a, I>(canonical: &Path, volumes: I) -> Option<u64>
where
    I: IntoIterator<Item = (&'a Path, u64)>,
{
    volumes
        .into_iter()
        .filter(|(mount, _)| canonical.starts_with(mount))
        .max_by_key(|(mount, _)| mount.as_os_str().len())
        .map(|(_, available)| available)
}

/// 原生路径：直接调用平台的扩展磁盘空间原语。
///
/// 三元组中只有用户可用字节数会被上报，其余两项停留在调用接缝处。
pub struct NativeFreeSpace {
    call: Arc<dyn DiskFreeSpaceCall>,
}

impl NativeFreeSpace {
    /// 使用平台系统调用创建原生查询。
    #[cfg(any(unix, windows))]
    pub fn new() -> Self {
        Self {
            call: Arc::new(OsDiskFreeSpaceCall),
        }
    }

    /// 使用注入的系统调用实现创建原生查询。
    pub fn with_call(call: Arc<dyn DiskFreeSpaceCall>) -> Self {
        Self { call }
    }
}

#[cfg(any(unix, windows))]
impl Default for NativeFreeSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl FreeSpaceProvider for NativeFreeSpace {
    fn available_bytes(&self, path: &str) -> Result<u64> {
        if path.is_empty() {
            return Err(FreeSpaceError::EmptyPath);
        }

        let dir = ensure_trailing_separator(path);
        Ok(self.call.disk_free_space(&dir)?.available)
    }
}

#[cfg(windows)]
const TRAILING_SEPARATORS: &[char] = &['\\', '/'];
#[cfg(not(windows))]
const TRAILING_SEPARATORS: &[char] = &['/'];

/// 去掉所有结尾分隔符后补回恰好一个。
///
/// 原生调用对结尾分隔符敏感，必须保证路径在它眼中是目录；根目录去掉
/// 分隔符后补回仍是根目录。
fn ensure_trailing_separator(path: &str) -> String {
    let trimmed = path.trim_end_matches(TRAILING_SEPARATORS);
    format!("{trimmed}{}", std::path::MAIN_SEPARATOR)
}
