//! 页面访问守卫
//!
//! 对每个功能页面执行权限裁决。页面挂载时调用守卫，守卫只读取
//! 已解析的会话状态，同步给出三种结果之一：
//!
//! - **Owner**: 店主是租户的根身份，永远不会被锁在自己的数据之外，
//!   直接放行，不查询权限表
//! - **Permitted**: 员工且权限表允许查看该页面，放行
//! - **Denied**: 员工且权限表拒绝，渲染统一的"无权限"页面
//!
//! 守卫本身不发起网络请求，也没有加载状态。

use serde::{Deserialize, Serialize};

use shared::error::ErrorCode;
use shared::models::{PageKey, PermissionsState};

use crate::session::StaffSession;

/// 界面语言
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    /// Türkçe (默认)
    #[default]
    Tr,
    /// English
    En,
}

/// 页面显示名称
pub fn page_label(page: PageKey, locale: Locale) -> &'static str {
    match locale {
        Locale::Tr => match page {
            PageKey::Dashboard => "Panel",
            PageKey::Appointments => "Randevular",
            PageKey::Customers => "Müşteriler",
            PageKey::Services => "Hizmetler",
            PageKey::Staff => "Personel",
            PageKey::Packages => "Paketler",
            PageKey::Cashier => "Kasa",
            PageKey::Stock => "Stok",
            PageKey::Reports => "Raporlar",
            PageKey::Settings => "Ayarlar",
        },
        Locale::En => match page {
            PageKey::Dashboard => "Dashboard",
            PageKey::Appointments => "Appointments",
            PageKey::Customers => "Customers",
            PageKey::Services => "Services",
            PageKey::Staff => "Staff",
            PageKey::Packages => "Packages",
            PageKey::Cashier => "Cashier",
            PageKey::Stock => "Stock",
            PageKey::Reports => "Reports",
            PageKey::Settings => "Settings",
        },
    }
}

/// 页面图标名称 (由前端图标库解析)
pub fn page_icon(page: PageKey) -> &'static str {
    match page {
        PageKey::Dashboard => "home",
        PageKey::Appointments => "calendar",
        PageKey::Customers => "users",
        PageKey::Services => "scissors",
        PageKey::Staff => "id-card",
        PageKey::Packages => "gift",
        PageKey::Cashier => "cash-register",
        PageKey::Stock => "archive",
        PageKey::Reports => "bar-chart",
        PageKey::Settings => "settings",
    }
}

/// 拒绝页面上唯一的导航动作
///
/// 拒绝页面永远提供一条返回路径，不会把用户困住。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavAction {
    /// 返回首页
    NavigateHome,
}

impl NavAction {
    /// 目标路由
    pub fn route(&self) -> &'static str {
        match self {
            NavAction::NavigateHome => "/",
        }
    }
}

/// "无权限"页面的渲染内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeniedScreen {
    /// 统一错误码 (E2003)
    pub code: ErrorCode,
    /// 图标名称
    pub icon: &'static str,
    /// 标题
    pub title: &'static str,
    /// 说明文字 (指明被拒绝的页面)
    pub message: String,
    /// 唯一的导航动作
    pub action: NavAction,
}

impl DeniedScreen {
    fn new(page: PageKey, locale: Locale) -> Self {
        let label = page_label(page, locale);
        let (title, message) = match locale {
            Locale::Tr => (
                "Erişim Yetkisi Yok",
                format!("{label} sayfasına erişim yetkiniz bulunmuyor."),
            ),
            Locale::En => (
                "No Access Permission",
                format!("You do not have permission to access the {label} page."),
            ),
        };
        Self {
            code: ErrorCode::PageAccessDenied,
            icon: "lock",
            title,
            message,
            action: NavAction::NavigateHome,
        }
    }
}

/// 守卫裁决
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GuardVerdict {
    /// 渲染被保护的页面内容
    Granted,
    /// 渲染统一的"无权限"页面
    Denied(DeniedScreen),
}

impl GuardVerdict {
    pub fn is_granted(&self) -> bool {
        matches!(self, GuardVerdict::Granted)
    }
}

/// 页面访问守卫
#[derive(Debug, Clone, Copy, Default)]
pub struct PageGuard {
    locale: Locale,
}

impl PageGuard {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// 对会话和页面做出裁决
    pub fn evaluate(&self, session: &StaffSession, page: PageKey) -> GuardVerdict {
        // 店主直接放行，不查询权限表
        if session.is_owner() {
            return GuardVerdict::Granted;
        }

        if session.permissions().can_access_page(page) {
            return GuardVerdict::Granted;
        }

        tracing::warn!(
            username = %session.username,
            page = %page,
            "page access denied"
        );
        GuardVerdict::Denied(DeniedScreen::new(page, self.locale))
    }

    /// 不经过会话对象的底层裁决 (管理后台等另行持有权限状态的场景)
    pub fn evaluate_state(
        &self,
        is_owner: bool,
        permissions: &PermissionsState,
        page: PageKey,
    ) -> GuardVerdict {
        if is_owner || permissions.can_access_page(page) {
            GuardVerdict::Granted
        } else {
            GuardVerdict::Denied(DeniedScreen::new(page, self.locale))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LoginMode;
    use shared::client::UserInfo;
    use shared::models::{Tenant, UserType};

    fn session(user_type: UserType, permissions: Option<&str>) -> StaffSession {
        StaffSession {
            username: "ayse".to_string(),
            token: "tok".to_string(),
            user: UserInfo {
                id: "st_01".to_string(),
                username: "ayse".to_string(),
                display_name: "Ayşe".to_string(),
                user_type,
                permissions: permissions.map(str::to_string),
            },
            tenant: Tenant::default(),
            login_mode: LoginMode::Online,
            expires_at: None,
            logged_in_at: 0,
        }
    }

    #[test]
    fn test_owner_always_granted() {
        let guard = PageGuard::default();
        // 即使权限表拒绝一切，店主也放行
        let denied_all = r#"{"dashboard":{"view":false,"create":false,"edit":false,"delete":false}}"#;
        let owner = session(UserType::Owner, Some(denied_all));

        for &page in PageKey::ALL {
            assert!(guard.evaluate(&owner, page).is_granted(), "{page}");
        }
    }

    #[test]
    fn test_staff_denied_screen() {
        let guard = PageGuard::default();
        let blob = r#"{"stock":{"view":false,"create":false,"edit":false,"delete":false}}"#;
        let staff = session(UserType::Staff, Some(blob));

        match guard.evaluate(&staff, PageKey::Stock) {
            GuardVerdict::Denied(screen) => {
                assert_eq!(screen.code, ErrorCode::PageAccessDenied);
                assert_eq!(screen.title, "Erişim Yetkisi Yok");
                assert!(screen.message.contains("Stok"));
                assert_eq!(screen.action, NavAction::NavigateHome);
                assert_eq!(screen.action.route(), "/");
            }
            GuardVerdict::Granted => panic!("expected denial"),
        }
    }

    #[test]
    fn test_staff_denied_screen_english() {
        let guard = PageGuard::new(Locale::En);
        let blob = r#"{"stock":{"view":false,"create":false,"edit":false,"delete":false}}"#;
        let staff = session(UserType::Staff, Some(blob));

        match guard.evaluate(&staff, PageKey::Stock) {
            GuardVerdict::Denied(screen) => {
                assert_eq!(screen.title, "No Access Permission");
                assert!(screen.message.contains("Stock"));
            }
            GuardVerdict::Granted => panic!("expected denial"),
        }
    }

    #[test]
    fn test_staff_permitted() {
        let guard = PageGuard::default();
        let blob = r#"{"cashier":{"view":true,"create":true,"edit":false,"delete":false}}"#;
        let staff = session(UserType::Staff, Some(blob));

        assert!(guard.evaluate(&staff, PageKey::Cashier).is_granted());
        assert!(!guard.evaluate(&staff, PageKey::Reports).is_granted());
    }

    #[test]
    fn test_unconfigured_staff_granted() {
        // 从未配置过权限表的员工: fail-open
        let guard = PageGuard::default();
        let staff = session(UserType::Staff, None);

        for &page in PageKey::ALL {
            assert!(guard.evaluate(&staff, page).is_granted(), "{page}");
        }
    }

    #[test]
    fn test_evaluate_state_matches_session_path() {
        let guard = PageGuard::default();
        let state = PermissionsState::from_raw(Some(
            r#"{"reports":{"view":true,"create":false,"edit":false,"delete":false}}"#,
        ));

        assert!(guard.evaluate_state(false, &state, PageKey::Reports).is_granted());
        assert!(!guard.evaluate_state(false, &state, PageKey::Settings).is_granted());
        assert!(guard.evaluate_state(true, &state, PageKey::Settings).is_granted());
    }
}
