//! Command-line tests.

use clap::Parser;
use welfare_server::{
    Cli, GateConfig, ServerConfig,
    cmd::{Command, check::CheckRoute},
    serve_with_config,
};

fn check(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).unwrap();
    let Some(Command::CheckRoute(cmd)) = cli.command else {
        panic!("expected check-route");
    };
    cmd.evaluate(&GateConfig::default()).unwrap()
}

#[test]
fn check_route_verdicts() {
    assert_eq!(check(&["welfare-server", "check-route", "/donate/zakat"]), "allow");
    assert_eq!(
        check(&["welfare-server", "check-route", "/dashboard"]),
        "deny: unauthenticated -> /sign-in"
    );
    assert_eq!(
        check(&["welfare-server", "check-route", "/admin/verify-requests", "--role", "moderator"]),
        "allow (Verify Requests)"
    );
    assert_eq!(
        check(&["welfare-server", "check-route", "/profile", "--signed-in"]),
        "allow"
    );

    let forbidden = check(&["welfare-server", "check-route", "/admin/settings", "--role", "scrapper"]);
    assert!(forbidden.starts_with("deny: forbidden -> /unauthorized?message=Access+denied."));
    assert!(forbidden.contains("userRole=scrapper"));
}

#[test]
fn check_route_rejects_unknown_role() {
    let cmd = CheckRoute {
        path: "/dashboard".to_owned(),
        method: "GET".to_owned(),
        role: Some("root".to_owned()),
        signed_in: false,
    };
    assert!(cmd.evaluate(&GateConfig::default()).is_err());
}

#[test]
fn config_flag_is_global() {
    let cli = Cli::try_parse_from(["welfare-server", "serve", "--config", "/etc/welfare.toml"]).unwrap();
    assert_eq!(cli.config, std::path::PathBuf::from("/etc/welfare.toml"));
    assert!(matches!(cli.command, Some(Command::Serve(_))));

    let cli = Cli::try_parse_from(["welfare-server"]).unwrap();
    assert_eq!(cli.config, std::path::PathBuf::from("welfare.toml"));
    assert!(cli.command.is_none());
}

#[tokio::test]
async fn serve_binds_and_shuts_down() {
    let config = ServerConfig::default();
    let handle = serve_with_config(&config, "127.0.0.1:0").await.unwrap();
    assert_ne!(handle.port, 0);
    handle.shutdown().await.unwrap();
}
