use std::path::PathBuf;

use chrono_tz::Tz;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、上传图片、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | REPORT_TIMEZONE | Africa/Dakar | 报表日界时区 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/pos HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、上传图片、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 报表日界时区
    ///
    /// 报表按日历日分组必须使用固定的门店时区，
    /// 绝不依赖运行环境的本地时区，否则日界不可复现。
    pub timezone: Tz,
    /// 运行环境: development | staging | production
    pub environment: String,
}

/// 默认报表时区 (西非, 无夏令时)
const DEFAULT_TIMEZONE: Tz = chrono_tz::Africa::Dakar;

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone: std::env::var("REPORT_TIMEZONE")
                .ok()
                .and_then(|raw| match raw.parse() {
                    Ok(tz) => Some(tz),
                    Err(_) => {
                        tracing::warn!(
                            "Invalid REPORT_TIMEZONE '{}', falling back to {}",
                            raw,
                            DEFAULT_TIMEZONE
                        );
                        None
                    }
                })
                .unwrap_or(DEFAULT_TIMEZONE),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 数据库文件路径
    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("pos.db")
    }

    /// 上传图片目录
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads/images")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
