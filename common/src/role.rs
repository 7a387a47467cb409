//! アップロード枠（ロール）定義
//!
//! ロールの集合はページ側で決まる。ここでは既定の家族構成と表示名を持つ。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 比較の起点となるロール
pub const ANCHOR_ROLE: &str = "child";

/// 既定ロールと表示名
pub const DEFAULT_ROLES: &[(&str, &str)] = &[
    ("child", "아이"),
    ("father", "아빠"),
    ("mother", "엄마"),
    ("pgrandpa", "친할아버지"),
    ("pgrandma", "친할머니"),
    ("mgrandpa", "외할아버지"),
    ("mgrandma", "외할머니"),
];

/// アップロード枠の識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn anchor() -> Self {
        Self::new(ANCHOR_ROLE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_anchor(&self) -> bool {
        self.0 == ANCHOR_ROLE
    }

    /// 既定ロールなら表示名、それ以外は識別子そのもの
    pub fn label(&self) -> &str {
        DEFAULT_ROLES
            .iter()
            .find(|(name, _)| *name == self.0)
            .map(|(_, label)| *label)
            .unwrap_or(&self.0)
    }

    pub fn is_known(&self) -> bool {
        DEFAULT_ROLES.iter().any(|(name, _)| *name == self.0)
    }

    /// アップロード時のファイル名（`{role}.jpg`）
    pub fn upload_file_name(&self) -> String {
        format!("{}.jpg", self.0)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// 既定ロールを表示順で返す
pub fn default_roles() -> Vec<Role> {
    DEFAULT_ROLES.iter().map(|(name, _)| Role::new(*name)).collect()
}

/// ページ側の指定（"child,father,mother"）からロール一覧を作る
///
/// 空要素と重複は捨てる。何も残らなければ既定ロール。
pub fn parse_role_list(spec: &str) -> Vec<Role> {
    let mut roles: Vec<Role> = Vec::new();
    for name in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let role = Role::new(name);
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    if roles.is_empty() {
        default_roles()
    } else {
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_role() {
        assert!(Role::anchor().is_anchor());
        assert!(!Role::new("father").is_anchor());
    }

    #[test]
    fn test_label_known_role() {
        assert_eq!(Role::new("mother").label(), "엄마");
        assert_eq!(Role::new("mgrandma").label(), "외할머니");
    }

    #[test]
    fn test_label_unknown_role_falls_back_to_name() {
        let role = Role::new("uncle");
        assert_eq!(role.label(), "uncle");
        assert!(!role.is_known());
    }

    #[test]
    fn test_upload_file_name() {
        assert_eq!(Role::new("child").upload_file_name(), "child.jpg");
    }

    #[test]
    fn test_default_roles_order() {
        let roles = default_roles();
        assert_eq!(roles.len(), 7);
        assert_eq!(roles[0], Role::anchor());
        assert_eq!(roles[6].as_str(), "mgrandma");
    }

    #[test]
    fn test_parse_role_list() {
        let roles = parse_role_list(" child, father ,,child,uncle");
        let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
        assert_eq!(names, vec!["child", "father", "uncle"]);
    }

    #[test]
    fn test_parse_role_list_empty_uses_defaults() {
        assert_eq!(parse_role_list(" , "), default_roles());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Role::new("father")).unwrap();
        assert_eq!(json, "\"father\"");
        let role: Role = serde_json::from_str("\"child\"").unwrap();
        assert!(role.is_anchor());
    }
}
