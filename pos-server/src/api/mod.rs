//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录接口
//! - [`upload`] - 图片上传与访问接口
//! - [`products`] - 商品管理接口
//! - [`orders`] - 订单接口
//! - [`reports`] - 销售报表接口

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod reports;
pub mod upload;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
