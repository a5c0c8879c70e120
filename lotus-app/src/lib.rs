//! Lotus Salon - 员工端应用核心
//!
//! 为沙龙业务管理系统的客户端外壳 (管理后台、员工移动端) 提供
//! 与界面无关的核心逻辑：
//!
//! - 会话管理 (在线/离线登录、重启恢复)
//! - 页面访问守卫 (店主/员工权限裁决)
//! - 导航抽屉组装
//!
//! 外壳本身 (渲染、路由) 不在此 crate 范围内。

pub mod guard;
pub mod logging;
pub mod navigation;
pub mod session;
pub mod tenant_manager;

// Re-export workspace crates for the app shells
pub use lotus_client;
pub use shared;

pub use guard::{DeniedScreen, GuardVerdict, Locale, NavAction, PageGuard};
pub use navigation::{DrawerComposer, DrawerCounts, DrawerItem, DrawerMode};
pub use session::{LoginMode, SessionError, SessionStore, StaffSession};
pub use tenant_manager::{TenantError, TenantManager};
