//! POS Server - 小型餐厅销售点后端
//!
//! # 架构概述
//!
//! 本模块是 POS 后端的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): SQLite 商品/订单/用户存储
//! - **订单联结** (`orders`): 订单行与商品目录的联结
//! - **销售报表** (`reporting`): 按日分组的销售汇总
//! - **商品生命周期** (`services`): 创建与软/硬删除决策
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/       # 配置、状态、服务器
//! ├── api/        # HTTP 路由和处理器
//! ├── db/         # 数据库层 (models + repository)
//! ├── orders/     # 订单联结引擎
//! ├── reporting/  # 销售报表聚合
//! ├── services/   # 商品生命周期服务
//! ├── assets/     # 图片资源存储
//! ├── client/     # 客户端购物车
//! └── utils/      # 错误、日志、金额、时间工具
//! ```

pub mod api;
pub mod assets;
pub mod client;
pub mod core;
pub mod db;
pub mod orders;
pub mod reporting;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____  ____  _____
   / __ \/ __ \/ ___/
  / /_/ / / / /\__ \
 / ____/ /_/ /___/ /
/_/    \____//____/
    "#
    );
}
