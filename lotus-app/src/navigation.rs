//! 导航抽屉组装
//!
//! 根据当前会话组装侧边导航条目。条目的可见性策略留给调用方选择:
//!
//! - [`DrawerMode::ShowAll`]: 列出全部页面，被拒绝的条目带
//!   `accessible = false`，前端可置灰渲染 (可发现性优先)
//! - [`DrawerMode::HideDenied`]: 直接隐藏被拒绝的页面 (最小惊讶优先)
//!
//! 徽标数字由调用方提供，组装本身不发起任何 I/O。

use serde::Serialize;

use shared::models::PageKey;

use crate::guard::{page_icon, page_label, Locale};
use crate::session::StaffSession;

/// 抽屉条目可见性策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawerMode {
    /// 全部列出，被拒绝的条目标记为不可用 (观察到的现状)
    #[default]
    ShowAll,
    /// 隐藏被拒绝的条目
    HideDenied,
}

/// 徽标数字 (由调用方查询后传入)
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawerCounts {
    /// 今日待处理预约数
    pub pending_appointments: u32,
    /// 低于阈值的库存条目数
    pub low_stock_items: u32,
}

/// 单个导航条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawerItem {
    pub page: PageKey,
    pub label: &'static str,
    pub icon: &'static str,
    /// 徽标数字 (仅在大于零时出现)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,
    /// 当前会话是否可进入该页面
    pub accessible: bool,
}

/// 导航抽屉组装器
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawerComposer {
    mode: DrawerMode,
    locale: Locale,
}

impl DrawerComposer {
    pub fn new(mode: DrawerMode, locale: Locale) -> Self {
        Self { mode, locale }
    }

    /// 组装当前会话可见的导航条目
    pub fn compose(&self, session: &StaffSession, counts: &DrawerCounts) -> Vec<DrawerItem> {
        let is_owner = session.is_owner();
        let permissions = session.permissions();

        PageKey::ALL
            .iter()
            .filter_map(|&page| {
                let accessible = is_owner || permissions.can_access_page(page);

                if !accessible && self.mode == DrawerMode::HideDenied {
                    return None;
                }

                Some(DrawerItem {
                    page,
                    label: page_label(page, self.locale),
                    icon: page_icon(page),
                    badge: Self::badge_for(page, counts),
                    accessible,
                })
            })
            .collect()
    }

    /// 页面对应的徽标数字
    fn badge_for(page: PageKey, counts: &DrawerCounts) -> Option<u32> {
        let count = match page {
            PageKey::Appointments => counts.pending_appointments,
            PageKey::Stock => counts.low_stock_items,
            _ => 0,
        };
        (count > 0).then_some(count)
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

    const VIEW_STOCK_ONLY: &str =
        r#"{"stock":{"view":true,"create":false,"edit":false,"delete":false}}"#;

    #[test]
    fn test_show_all_lists_every_page() {
        let composer = DrawerComposer::default();
        let staff = session(UserType::Staff, Some(VIEW_STOCK_ONLY));

        let items = composer.compose(&staff, &DrawerCounts::default());
        assert_eq!(items.len(), PageKey::ALL.len());

        let stock = items.iter().find(|i| i.page == PageKey::Stock).unwrap();
        assert!(stock.accessible);
        let settings = items.iter().find(|i| i.page == PageKey::Settings).unwrap();
        assert!(!settings.accessible);
    }

    #[test]
    fn test_hide_denied_filters_items() {
        let composer = DrawerComposer::new(DrawerMode::HideDenied, Locale::Tr);
        let staff = session(UserType::Staff, Some(VIEW_STOCK_ONLY));

        let items = composer.compose(&staff, &DrawerCounts::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].page, PageKey::Stock);
        assert_eq!(items[0].label, "Stok");
    }

    #[test]
    fn test_owner_sees_everything() {
        let composer = DrawerComposer::new(DrawerMode::HideDenied, Locale::Tr);
        // 即使权限表为空，店主也看到全部条目
        let owner = session(UserType::Owner, Some("{}"));

        let items = composer.compose(&owner, &DrawerCounts::default());
        assert_eq!(items.len(), PageKey::ALL.len());
        assert!(items.iter().all(|i| i.accessible));
    }

    #[test]
    fn test_badges_attach_to_the_right_items() {
        let composer = DrawerComposer::default();
        let staff = session(UserType::Staff, None);
        let counts = DrawerCounts {
            pending_appointments: 3,
            low_stock_items: 2,
        };

        let items = composer.compose(&staff, &counts);
        for item in &items {
            match item.page {
                PageKey::Appointments => assert_eq!(item.badge, Some(3)),
                PageKey::Stock => assert_eq!(item.badge, Some(2)),
                _ => assert_eq!(item.badge, None, "{}", item.page),
            }
        }
    }

    #[test]
    fn test_zero_counts_carry_no_badge() {
        let composer = DrawerComposer::default();
        let staff = session(UserType::Staff, None);

        let items = composer.compose(&staff, &DrawerCounts::default());
        assert!(items.iter().all(|i| i.badge.is_none()));
    }
}
