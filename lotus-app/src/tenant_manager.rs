//! TenantManager - 多租户会话管理
//!
//! 负责管理多租户的数据目录和员工会话缓存。
//! 支持：
//! - 租户切换
//! - 员工登录（在线/离线）
//! - 会话持久化（重启后恢复登录状态）

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

use lotus_client::{ClientConfig, ClientError};

use crate::session::{LoginMode, SessionError, SessionStore, StaffSession};

#[derive(Debug, Error)]
pub enum TenantError {
    #[error("Tenant not found: {0}")]
    NotFound(String),

    #[error("No tenant selected")]
    NoTenantSelected,

    #[error("Session store error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),
}

/// 租户条目 (本地数据目录视角)
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TenantEntry {
    pub tenant_id: String,
    /// 是否有缓存的员工可离线登录
    pub has_cached_staff: bool,
}

/// 多租户管理器
///
/// 持有各租户的会话缓存和当前活动会话。守卫和抽屉只消费
/// [`current_session`](TenantManager::current_session) 返回的会话。
pub struct TenantManager {
    /// 基础路径 (~/.lotus_salon/tenants)
    base_path: PathBuf,
    /// 当前活跃租户 ID
    current_tenant: Option<String>,
    /// 各租户的会话缓存
    session_stores: HashMap<String, SessionStore>,
    /// 当前员工会话
    current_session: Option<StaffSession>,
}

impl TenantManager {
    /// 创建新的 TenantManager
    ///
    /// # Arguments
    /// * `base_path` - 租户数据的基础路径 (如 ~/.lotus_salon/tenants)
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            current_tenant: None,
            session_stores: HashMap::new(),
            current_session: None,
        }
    }

    /// 加载已存在的租户
    pub fn load_existing_tenants(&mut self) -> Result<(), TenantError> {
        if !self.base_path.exists() {
            std::fs::create_dir_all(&self.base_path)?;
            return Ok(());
        }

        for entry in std::fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                if let Some(tenant_id) = path.file_name().and_then(|n| n.to_str()) {
                    self.load_tenant(tenant_id)?;
                }
            }
        }

        Ok(())
    }

    /// 加载单个租户
    fn load_tenant(&mut self, tenant_id: &str) -> Result<(), TenantError> {
        let tenant_path = self.base_path.join(tenant_id);
        let store = SessionStore::load(&tenant_path)?;
        self.session_stores.insert(tenant_id.to_string(), store);
        Ok(())
    }

    // ============ 租户管理 ============

    /// 列出所有本地租户
    pub fn list_tenants(&self) -> Vec<TenantEntry> {
        self.session_stores
            .iter()
            .map(|(tenant_id, store)| TenantEntry {
                tenant_id: tenant_id.clone(),
                has_cached_staff: !store.list_staff().is_empty(),
            })
            .collect()
    }

    /// 切换当前租户 (目录不存在则创建)
    pub fn switch_tenant(&mut self, tenant_id: &str) -> Result<(), TenantError> {
        if !self.session_stores.contains_key(tenant_id) {
            let tenant_path = self.base_path.join(tenant_id);
            std::fs::create_dir_all(&tenant_path)?;
            self.load_tenant(tenant_id)?;
        }

        // 清除当前会话
        self.current_session = None;
        self.current_tenant = Some(tenant_id.to_string());

        tracing::info!(tenant_id = %tenant_id, "Switched to tenant");

        Ok(())
    }

    /// 移除租户 (删除本地缓存)
    pub fn remove_tenant(&mut self, tenant_id: &str) -> Result<(), TenantError> {
        if self.current_tenant.as_deref() == Some(tenant_id) {
            self.current_tenant = None;
            self.current_session = None;
        }

        self.session_stores.remove(tenant_id);

        let tenant_path = self.base_path.join(tenant_id);
        if tenant_path.exists() {
            std::fs::remove_dir_all(&tenant_path)?;
        }

        tracing::info!(tenant_id = %tenant_id, "Tenant removed");

        Ok(())
    }

    // ============ 员工登录 ============

    /// 在线登录 (同时更新离线缓存)
    pub async fn login_online(
        &mut self,
        username: &str,
        password: &str,
        api_url: &str,
    ) -> Result<StaffSession, TenantError> {
        let tenant_id = self
            .current_tenant
            .as_ref()
            .ok_or(TenantError::NoTenantSelected)?
            .clone();

        let client = ClientConfig::new(api_url).build_http_client();

        let data = client.login(username, password).await.map_err(|e| match e {
            ClientError::Unauthorized => TenantError::AuthFailed("Invalid credentials".to_string()),
            ClientError::Validation(msg) | ClientError::Forbidden(msg) => {
                TenantError::AuthFailed(msg)
            }
            other => TenantError::Network(other.to_string()),
        })?;

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        // 创建会话
        let session = StaffSession {
            username: username.to_string(),
            expires_at: StaffSession::parse_jwt_exp(&data.token),
            token: data.token,
            user: data.user,
            tenant: data.tenant,
            login_mode: LoginMode::Online,
            logged_in_at: now,
        };

        // 更新缓存
        if let Some(store) = self.session_stores.get_mut(&tenant_id) {
            store.update_staff_cache(username, password, &session)?;
        }

        self.current_session = Some(session.clone());

        tracing::info!(username = %username, mode = "online", "Staff logged in");

        Ok(session)
    }

    /// 离线登录 (使用缓存验证)
    pub fn login_offline(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<StaffSession, TenantError> {
        let tenant_id = self
            .current_tenant
            .as_ref()
            .ok_or(TenantError::NoTenantSelected)?
            .clone();

        let store = self
            .session_stores
            .get(&tenant_id)
            .ok_or_else(|| TenantError::NotFound(tenant_id.clone()))?;

        // 验证离线凭据
        let session = store.verify_offline_login(username, password)?;

        self.current_session = Some(session.clone());

        tracing::info!(username = %username, mode = "offline", "Staff logged in");

        Ok(session)
    }

    /// 自动登录 (优先在线，失败则尝试离线)
    pub async fn login_auto(
        &mut self,
        username: &str,
        password: &str,
        api_url: &str,
    ) -> Result<StaffSession, TenantError> {
        match self.login_online(username, password, api_url).await {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::warn!(error = %e, "Online login failed, trying offline");
                self.login_offline(username, password)
            }
        }
    }

    /// 登出 (同时清除持久化的当前会话)
    pub fn logout(&mut self) -> Result<(), TenantError> {
        if let Some(session) = self.current_session.take() {
            tracing::info!(username = %session.username, "Staff logged out");
        }
        self.clear_current_session()
    }

    // ============ 状态查询 ============

    /// 获取当前租户ID
    pub fn current_tenant_id(&self) -> Option<&str> {
        self.current_tenant.as_deref()
    }

    /// 获取当前员工会话
    pub fn current_session(&self) -> Option<&StaffSession> {
        self.current_session.as_ref()
    }

    /// 检查是否有缓存的离线登录数据
    pub fn has_offline_cache(&self, username: &str) -> bool {
        if let Some(tenant_id) = &self.current_tenant {
            if let Some(store) = self.session_stores.get(tenant_id) {
                return store.has_staff(username);
            }
        }
        false
    }

    /// 获取当前租户的缓存员工列表
    pub fn list_cached_staff(&self) -> Vec<String> {
        if let Some(tenant_id) = &self.current_tenant {
            if let Some(store) = self.session_stores.get(tenant_id) {
                return store.list_staff();
            }
        }
        Vec::new()
    }

    /// 获取当前租户目录
    pub fn current_tenant_path(&self) -> Option<PathBuf> {
        self.current_tenant
            .as_ref()
            .map(|id| self.base_path.join(id))
    }

    // ============ 当前活动会话持久化 ============

    /// 保存当前活动会话到磁盘
    pub fn save_current_session(&self, session: &StaffSession) -> Result<(), TenantError> {
        let tenant_id = self
            .current_tenant
            .as_ref()
            .ok_or(TenantError::NoTenantSelected)?;

        let store = self
            .session_stores
            .get(tenant_id)
            .ok_or_else(|| TenantError::NotFound(tenant_id.clone()))?;

        store.save_current_session(session).map_err(TenantError::Session)
    }

    /// 加载缓存的当前活动会话
    pub fn load_current_session(&self) -> Result<Option<StaffSession>, TenantError> {
        let tenant_id = self
            .current_tenant
            .as_ref()
            .ok_or(TenantError::NoTenantSelected)?;

        let store = self
            .session_stores
            .get(tenant_id)
            .ok_or_else(|| TenantError::NotFound(tenant_id.clone()))?;

        store.load_current_session().map_err(TenantError::Session)
    }

    /// 清除缓存的当前活动会话
    pub fn clear_current_session(&self) -> Result<(), TenantError> {
        if let Some(tenant_id) = &self.current_tenant {
            if let Some(store) = self.session_stores.get(tenant_id) {
                store.clear_current_session().map_err(TenantError::Session)?;
            }
        }
        Ok(())
    }

    /// 设置当前会话 (用于恢复登录状态)
    pub fn set_current_session(&mut self, session: StaffSession) {
        tracing::info!(username = %session.username, "Session restored from cache");
        self.current_session = Some(session);
    }
}
