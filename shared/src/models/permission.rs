//! Staff Permission Schema
//!
//! Per-page access control for non-owner staff accounts. An owner authors a
//! schema in the staff editor; the backend stores it as a JSON blob embedded
//! in the staff record (string field, not a dedicated endpoint), and every
//! client surface parses it back wherever access is decided.
//!
//! Wire format:
//! ```json
//! {
//!     "dashboard": { "view": true, "create": false, "edit": false, "delete": false },
//!     "stock":     { "view": false, "create": false, "edit": false, "delete": false }
//! }
//! ```
//! A page key absent from the blob means full denial for that page.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Functional page identifiers (the unit of access control)
///
/// Extend only by adding new keys, never by repurposing existing ones:
/// backend-stored permission blobs reference these keys by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKey {
    Dashboard,
    Appointments,
    Customers,
    Services,
    Staff,
    Packages,
    Cashier,
    Stock,
    Reports,
    Settings,
}

impl PageKey {
    /// All recognized page keys, in drawer order
    pub const ALL: &'static [PageKey] = &[
        PageKey::Dashboard,
        PageKey::Appointments,
        PageKey::Customers,
        PageKey::Services,
        PageKey::Staff,
        PageKey::Packages,
        PageKey::Cashier,
        PageKey::Stock,
        PageKey::Reports,
        PageKey::Settings,
    ];

    /// Wire name of the key
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKey::Dashboard => "dashboard",
            PageKey::Appointments => "appointments",
            PageKey::Customers => "customers",
            PageKey::Services => "services",
            PageKey::Staff => "staff",
            PageKey::Packages => "packages",
            PageKey::Cashier => "cashier",
            PageKey::Stock => "stock",
            PageKey::Reports => "reports",
            PageKey::Settings => "settings",
        }
    }

    /// Parse a wire name; `None` for unrecognized keys
    pub fn parse(s: &str) -> Option<PageKey> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four granular capabilities tracked per page key
///
/// All four fields are required on the wire: a page key present in the
/// mapping always carries a complete record. `create`/`edit`/`delete`
/// without `view` is representable but meaningless in the UI (soft
/// invariant, not enforced by the schema).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl ActionSet {
    /// No capability on the page
    pub const NONE: ActionSet = ActionSet {
        view: false,
        create: false,
        edit: false,
        delete: false,
    };

    /// Read-only access to the page
    pub const VIEW_ONLY: ActionSet = ActionSet {
        view: true,
        create: false,
        edit: false,
        delete: false,
    };

    /// Full access to the page
    pub const FULL: ActionSet = ActionSet {
        view: true,
        create: true,
        edit: true,
        delete: true,
    };
}

/// Mapping from page key to [`ActionSet`]
///
/// Keys are stored as strings so that blobs written by a newer app version
/// (with page keys this build does not recognize) survive a parse→serialize
/// round trip untouched. Lookups go through [`PageKey`]; an absent key means
/// full denial for that page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffPermissions(BTreeMap<String, ActionSet>);

impl StaffPermissions {
    /// Create an empty schema (denies every page)
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions granted for a page, if the key is present
    pub fn get(&self, page: PageKey) -> Option<&ActionSet> {
        self.0.get(page.as_str())
    }

    /// Set the action record for a page
    pub fn set(&mut self, page: PageKey, actions: ActionSet) {
        self.0.insert(page.as_str().to_string(), actions);
    }

    /// Whether the page may be viewed (absent key denies)
    pub fn allows_view(&self, page: PageKey) -> bool {
        self.get(page).map(|a| a.view).unwrap_or(false)
    }

    /// Whether records may be created on the page
    pub fn allows_create(&self, page: PageKey) -> bool {
        self.get(page).map(|a| a.create).unwrap_or(false)
    }

    /// Whether records may be edited on the page
    pub fn allows_edit(&self, page: PageKey) -> bool {
        self.get(page).map(|a| a.edit).unwrap_or(false)
    }

    /// Whether records may be deleted on the page
    pub fn allows_delete(&self, page: PageKey) -> bool {
        self.get(page).map(|a| a.delete).unwrap_or(false)
    }

    /// Number of page records in the schema
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the schema has no page records
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to the wire blob embedded in the staff record
    pub fn to_blob(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Hard-coded default schema
///
/// Applied whenever a staff record carries a blob that cannot be decoded:
/// `dashboard`/`appointments`/`customers`/`services` are view-only, every
/// other page and every non-view action is denied.
pub fn default_permissions() -> StaffPermissions {
    let mut perms = StaffPermissions::new();
    for &page in PageKey::ALL {
        let actions = match page {
            PageKey::Dashboard
            | PageKey::Appointments
            | PageKey::Customers
            | PageKey::Services => ActionSet::VIEW_ONLY,
            _ => ActionSet::NONE,
        };
        perms.set(page, actions);
    }
    perms
}

/// Parse a permission blob from a staff record
///
/// `None`, an undecodable blob, and a blob with incomplete action records
/// all fall back to [`default_permissions`]. This never fails outward: a bad
/// permission blob must not crash navigation.
pub fn parse_permissions(raw: Option<&str>) -> StaffPermissions {
    match raw {
        None => default_permissions(),
        Some(blob) => serde_json::from_str(blob).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "malformed permission blob, falling back to defaults");
            default_permissions()
        }),
    }
}

/// Permission state of a staff account
///
/// `Unconfigured` is the explicit fail-open state: a staff member whose
/// record has never carried a schema is treated as fully privileged, so a
/// newly created account is not locked out before an owner configures it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionsState {
    /// No schema was ever assigned; every check passes
    Unconfigured,
    /// A schema is assigned; checks consult it
    Configured(StaffPermissions),
}

impl PermissionsState {
    /// Build the state from the raw blob field of a staff record
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => PermissionsState::Unconfigured,
            Some(blob) => PermissionsState::Configured(parse_permissions(Some(blob))),
        }
    }

    /// Whether the page may be viewed
    pub fn can_access_page(&self, page: PageKey) -> bool {
        match self {
            PermissionsState::Unconfigured => true,
            PermissionsState::Configured(p) => p.allows_view(page),
        }
    }

    /// Whether records may be created on the page
    pub fn can_create(&self, page: PageKey) -> bool {
        match self {
            PermissionsState::Unconfigured => true,
            PermissionsState::Configured(p) => p.allows_create(page),
        }
    }

    /// Whether records may be edited on the page
    pub fn can_edit(&self, page: PageKey) -> bool {
        match self {
            PermissionsState::Unconfigured => true,
            PermissionsState::Configured(p) => p.allows_edit(page),
        }
    }

    /// Whether records may be deleted on the page
    pub fn can_delete(&self, page: PageKey) -> bool {
        match self {
            PermissionsState::Unconfigured => true,
            PermissionsState::Configured(p) => p.allows_delete(page),
        }
    }

    /// The configured schema, if one is assigned
    pub fn as_configured(&self) -> Option<&StaffPermissions> {
        match self {
            PermissionsState::Unconfigured => None,
            PermissionsState::Configured(p) => Some(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_key_wire_names() {
        assert_eq!(PageKey::Dashboard.as_str(), "dashboard");
        assert_eq!(PageKey::Stock.as_str(), "stock");
        assert_eq!(PageKey::parse("cashier"), Some(PageKey::Cashier));
        assert_eq!(PageKey::parse("payroll"), None);
        assert_eq!(PageKey::ALL.len(), 10);

        // serde uses the same names as as_str
        for &key in PageKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn test_absent_key_denies() {
        let mut perms = StaffPermissions::new();
        perms.set(PageKey::Dashboard, ActionSet::VIEW_ONLY);

        assert!(!perms.allows_view(PageKey::Stock));
        assert!(!perms.allows_create(PageKey::Stock));
        assert!(!perms.allows_edit(PageKey::Stock));
        assert!(!perms.allows_delete(PageKey::Stock));
    }

    #[test]
    fn test_explicit_view_flag() {
        let mut perms = StaffPermissions::new();
        perms.set(PageKey::Stock, ActionSet::FULL);
        perms.set(PageKey::Settings, ActionSet::NONE);

        assert!(perms.allows_view(PageKey::Stock));
        assert!(perms.allows_delete(PageKey::Stock));
        assert!(!perms.allows_view(PageKey::Settings));
    }

    #[test]
    fn test_default_schema_shape() {
        let perms = default_permissions();
        assert_eq!(perms.len(), PageKey::ALL.len());

        for page in [
            PageKey::Dashboard,
            PageKey::Appointments,
            PageKey::Customers,
            PageKey::Services,
        ] {
            assert_eq!(perms.get(page), Some(&ActionSet::VIEW_ONLY), "{page}");
        }
        for page in [
            PageKey::Staff,
            PageKey::Packages,
            PageKey::Cashier,
            PageKey::Stock,
            PageKey::Reports,
            PageKey::Settings,
        ] {
            assert_eq!(perms.get(page), Some(&ActionSet::NONE), "{page}");
        }
    }

    #[test]
    fn test_parse_absent_and_malformed() {
        assert_eq!(parse_permissions(None), default_permissions());
        assert_eq!(parse_permissions(Some("not valid json")), default_permissions());
        assert_eq!(parse_permissions(Some("")), default_permissions());
        // incomplete action record fails decode and falls back too
        assert_eq!(
            parse_permissions(Some(r#"{"stock":{"view":true}}"#)),
            default_permissions()
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let blob = default_permissions().to_blob();
        assert_eq!(parse_permissions(Some(&blob)), default_permissions());
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let blob = r#"{"dashboard":{"view":true,"create":false,"edit":false,"delete":false},"payroll":{"view":true,"create":true,"edit":true,"delete":true}}"#;
        let perms = parse_permissions(Some(blob));

        // the unrecognized key is kept, not dropped and not reachable via PageKey
        assert_eq!(perms.len(), 2);
        assert!(perms.allows_view(PageKey::Dashboard));

        let reparsed = parse_permissions(Some(&perms.to_blob()));
        assert_eq!(reparsed, perms);
    }

    #[test]
    fn test_state_fail_open() {
        let state = PermissionsState::from_raw(None);
        assert_eq!(state, PermissionsState::Unconfigured);
        for &page in PageKey::ALL {
            assert!(state.can_access_page(page));
            assert!(state.can_create(page));
            assert!(state.can_edit(page));
            assert!(state.can_delete(page));
        }
    }

    #[test]
    fn test_state_configured() {
        let mut perms = StaffPermissions::new();
        perms.set(PageKey::Cashier, ActionSet::VIEW_ONLY);
        let state = PermissionsState::Configured(perms);

        assert!(state.can_access_page(PageKey::Cashier));
        assert!(!state.can_create(PageKey::Cashier));
        assert!(!state.can_access_page(PageKey::Reports));
        assert!(state.as_configured().is_some());
    }

    #[test]
    fn test_state_from_malformed_blob_uses_defaults() {
        let state = PermissionsState::from_raw(Some("{{{"));
        // configured (a blob exists) but with the default schema
        assert_eq!(
            state.as_configured(),
            Some(&default_permissions())
        );
        assert!(state.can_access_page(PageKey::Dashboard));
        assert!(!state.can_access_page(PageKey::Settings));
    }
}
