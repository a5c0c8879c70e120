//! 页面守卫演示
//!
//! 构造一个员工会话，展示守卫裁决和导航抽屉的组装结果。
//!
//! ```bash
//! cargo run -p lotus-app --example guard_flow
//! ```

use anyhow::Result;

use lotus_app::{
    DrawerComposer, DrawerCounts, DrawerMode, GuardVerdict, Locale, LoginMode, PageGuard,
    StaffSession,
};
use shared::client::UserInfo;
use shared::models::{ActionSet, PageKey, StaffPermissions, Tenant, UserType};

fn main() -> Result<()> {
    // 店主在员工编辑页授权的权限表
    let mut perms = StaffPermissions::new();
    perms.set(PageKey::Dashboard, ActionSet::VIEW_ONLY);
    perms.set(PageKey::Appointments, ActionSet::FULL);
    perms.set(PageKey::Cashier, ActionSet::VIEW_ONLY);

    let session = StaffSession {
        username: "ayse".to_string(),
        token: "demo-token".to_string(),
        user: UserInfo {
            id: "st_01".to_string(),
            username: "ayse".to_string(),
            display_name: "Ayşe".to_string(),
            user_type: UserType::Staff,
            permissions: Some(perms.to_blob()),
        },
        tenant: Tenant {
            id: "tn_01".to_string(),
            business_name: "Lotus Beauty".to_string(),
            ..Tenant::default()
        },
        login_mode: LoginMode::Online,
        expires_at: None,
        logged_in_at: 0,
    };

    let guard = PageGuard::new(Locale::Tr);
    for &page in PageKey::ALL {
        match guard.evaluate(&session, page) {
            GuardVerdict::Granted => println!("{page:<14} -> granted"),
            GuardVerdict::Denied(screen) => {
                println!("{page:<14} -> denied: {} ({})", screen.title, screen.message)
            }
        }
    }

    let composer = DrawerComposer::new(DrawerMode::ShowAll, Locale::Tr);
    let counts = DrawerCounts {
        pending_appointments: 3,
        low_stock_items: 1,
    };
    let drawer = composer.compose(&session, &counts);
    println!("\ndrawer:\n{}", serde_json::to_string_pretty(&drawer)?);

    Ok(())
}
