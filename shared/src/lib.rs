//! 店面前后端共享的领域模型与协议定义
//!
//! - `models`: 后端 REST API 返回的实体快照
//! - `page`: 列表 / 收藏夹响应的统一形状
//! - `protocol`: 每个后端端点的请求类型

pub mod models;
pub mod page;
pub mod protocol;

pub use models::*;
pub use page::{ListResponse, Page, WishlistResponse};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
pub const ACCESS_TOKEN_TTL_DAYS: u32 = 7;
pub const REFRESH_TOKEN_TTL_DAYS: u32 = 30;

/// 会话持久化使用的存储键
pub const SESSION_STORAGE_KEY: &str = "auth-storage";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
