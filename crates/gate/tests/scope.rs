//! Gate scope and role utility tests.

use welfare_gate::{
    Role, is_valid_role, join_roles,
    scope::{is_gated, is_static_asset},
};

#[test]
fn api_and_trpc_always_gated() {
    assert!(is_gated("/api"));
    assert!(is_gated("/api/protected/users"));
    assert!(is_gated("/api/export/report.csv"));
    assert!(is_gated("/trpc/users.list"));
}

#[test]
fn framework_assets_skipped() {
    assert!(!is_gated("/_next/static/chunks/main.js"));
    assert!(!is_gated("/_next/image"));
}

#[test]
fn static_assets_skipped() {
    for path in [
        "/favicon.ico",
        "/logo.PNG",
        "/fonts/inter.woff2",
        "/site.webmanifest",
        "/downloads/form.docx",
        "/index.html",
    ] {
        assert!(is_static_asset(path), "{path}");
        assert!(!is_gated(path), "{path}");
    }
}

#[test]
fn pages_and_json_gated() {
    assert!(is_gated("/"));
    assert!(is_gated("/admin/settings"));
    assert!(is_gated("/data/report.json"));
    assert!(!is_static_asset("/data/report.json"));
    assert!(!is_static_asset("/admin.settings/page"));
}

#[test]
fn role_names_parse() {
    assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!("scrapper".parse::<Role>().unwrap(), Role::Scrapper);
    assert!("Admin".parse::<Role>().is_err());
    assert_eq!(
        "root".parse::<Role>().unwrap_err().to_string(),
        "unknown role: root"
    );
}

#[test]
fn only_assignable_roles_are_valid() {
    assert!(is_valid_role("admin"));
    assert!(is_valid_role("moderator"));
    assert!(is_valid_role("scrapper"));
    assert!(!is_valid_role("user"));
    assert!(!is_valid_role("superuser"));
}

#[test]
fn roles_join_in_given_order() {
    assert_eq!(join_roles(&[Role::Moderator, Role::Admin]), "moderator, admin");
    assert_eq!(join_roles(&[]), "");
}

#[test]
fn role_display_uses_lowercase() {
    assert_eq!(Role::Scrapper.to_string(), "scrapper");
}
