//! Server configuration tests.

use gate::Role;
use welfare_server::{ServerConfig, config::write_default_config};

#[test]
fn parse_minimal_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
"#;
    let config = ServerConfig::from_toml(toml).unwrap();
    assert_eq!(config.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.gate.sign_in_path, "/sign-in");
    assert_eq!(config.gate.api_prefix, "/api/");
    assert_eq!(config.gate.identity_timeout_ms, 5_000);
    assert!(config.users.is_empty());
    assert!(config.sessions.is_empty());

    let table = config.gate.route_table().unwrap();
    assert_eq!(table.public().len(), 9);
    assert_eq!(table.protected().len(), 8);
}

#[test]
fn empty_config_uses_defaults() {
    let config = ServerConfig::from_toml("").unwrap();
    assert_eq!(config.bind_address(), "127.0.0.1:3000");
    assert_eq!(config.gate.session_cookie, "__session");
    assert_eq!(config.gate.redirect_cookie, "redirectTo");
    assert_eq!(config.gate.authorized_parties.len(), 4);
}

#[test]
fn parse_full_config() {
    let toml = r#"
[gate]
sign_in_path = "/login"
identity_timeout_ms = 250
authorized_parties = []
public_routes = ["/", "/about(.*)"]

[[gate.protected]]
name = "Admin"
patterns = ["/admin(.*)"]
allowed_roles = ["admin"]

[[users]]
id = "user_1"
name = "Amina"
email = "amina@example.org"
role = "moderator"

[[sessions]]
token = "tok-1"
user_id = "user_1"
ttl_secs = 60
"#;
    let config = ServerConfig::from_toml(toml).unwrap();
    assert_eq!(config.gate.sign_in_path, "/login");
    assert_eq!(config.gate.identity_timeout().as_millis(), 250);
    assert!(config.gate.authorized_parties.is_empty());
    assert_eq!(config.gate.protected.len(), 1);
    assert_eq!(config.gate.protected[0].allowed_roles, vec![Role::Admin]);
    assert_eq!(config.users[0].role, Some(Role::Moderator));
    assert_eq!(config.sessions[0].ttl_secs, 60);
    assert!(config.sessions[0].authorized_party.is_none());

    let table = config.gate.route_table().unwrap();
    assert!(table.is_public("/about/team"));
    assert_eq!(table.find_rule("/admin/x").unwrap().name, "Admin");
}

#[test]
fn session_ttl_defaults_to_a_week() {
    let toml = r#"
[[sessions]]
token = "tok"
user_id = "u"
"#;
    let config = ServerConfig::from_toml(toml).unwrap();
    assert_eq!(config.sessions[0].ttl_secs, 7 * 24 * 60 * 60);
}

#[test]
fn env_var_expansion_in_config() {
    // SAFETY: test-only, single-threaded access to this unique var.
    unsafe { std::env::set_var("WELFARE_TEST_SESSION_TOKEN", "expanded-token") };
    let toml = r#"
[[sessions]]
token = "${WELFARE_TEST_SESSION_TOKEN}"
user_id = "u"
"#;
    let config = ServerConfig::from_toml(toml).unwrap();
    assert_eq!(config.sessions[0].token, "expanded-token");
    unsafe { std::env::remove_var("WELFARE_TEST_SESSION_TOKEN") };
}

#[test]
fn invalid_pattern_is_rejected() {
    let toml = r#"
[gate]
public_routes = ["/blog/(.*)/comments"]
"#;
    assert!(ServerConfig::from_toml(toml).is_err());

    let relative = r#"
[[gate.protected]]
name = "Broken"
patterns = ["admin"]
allowed_roles = ["admin"]
"#;
    let err = ServerConfig::from_toml(relative).unwrap_err();
    assert!(format!("{err:#}").contains("Broken"));
}

#[test]
fn unknown_role_is_rejected() {
    let toml = r#"
[[gate.protected]]
name = "X"
patterns = ["/x"]
allowed_roles = ["superuser"]
"#;
    assert!(ServerConfig::from_toml(toml).is_err());
}

#[test]
fn default_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("welfare.toml");
    write_default_config(&path).unwrap();

    let loaded = ServerConfig::load(&path).unwrap();
    let defaults = ServerConfig::default();
    assert_eq!(loaded.bind_address(), defaults.bind_address());
    assert_eq!(loaded.gate.public_routes, defaults.gate.public_routes);
    assert_eq!(loaded.gate.protected.len(), defaults.gate.protected.len());
    assert_eq!(loaded.gate.protected[0].name, "Verify Requests");
}

#[test]
fn load_missing_file_names_path() {
    let err = ServerConfig::load(std::path::Path::new("/nonexistent/welfare.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/welfare.toml"));
}

#[test]
fn seeded_session_party_must_be_authorized() {
    let gate = ServerConfig::default().gate;
    assert!(gate.accepts_party(Some("https://khadimemillat.org")));
    assert!(!gate.accepts_party(Some("https://evil.example")));
    assert!(!gate.accepts_party(None));

    let open = ServerConfig::from_toml("[gate]\nauthorized_parties = []\n").unwrap();
    assert!(open.gate.accepts_party(None));
}
