use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::assets::{ImageStore, LocalImageStore};
use crate::core::Config;
use crate::db::DbService;
use crate::services::CatalogService;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc/池化句柄实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | SqlitePool | SQLite 连接池 |
/// | images | Arc<dyn ImageStore> | 图片资源存储 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub db: SqlitePool,
    /// 图片资源存储
    pub images: Arc<dyn ImageStore>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 方法代替
    pub fn new(config: Config, db: SqlitePool, images: Arc<dyn ImageStore>) -> Self {
        Self { config, db, images }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/pos.db, 含迁移)
    /// 3. 图片存储 (work_dir/uploads/images)
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config.ensure_work_dir_structure().map_err(|e| {
            AppError::internal(format!("Failed to create work directory structure: {}", e))
        })?;

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let images = Arc::new(LocalImageStore::new(config.uploads_dir()));

        Ok(Self::new(config.clone(), db_service.pool, images))
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 商品生命周期服务
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.db.clone(), self.images.clone())
    }
}
