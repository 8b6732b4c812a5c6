//! Lazy construction of intermediate members

use crate::common::*;
use optbind::{MappingResult, Parser};

#[test]
fn test_absent_node_is_built_on_write() {
    let mut parser = Parser::default();
    parser.bind(tls_port_path(), &["tls-port"]);
    let mut config = ServerConfig::default();
    assert!(config.listener.tls.is_none());

    let outcome = parser.parse(&args(&["--tls-port", "8443"]), &mut config);
    assert!(outcome.is_success());
    assert_eq!(
        config.listener.tls,
        Some(Tls {
            cert: String::new(),
            port: 8443
        })
    );
}

#[test]
fn test_present_node_is_reused() {
    let mut parser = Parser::default();
    parser.bind(tls_port_path(), &["tls-port"]);
    let mut config = ServerConfig::default();
    config.listener.tls = Some(Tls {
        cert: "server.pem".to_string(),
        port: 1,
    });

    parser.parse(&args(&["--tls-port", "9443"]), &mut config);
    let tls = config.listener.tls.unwrap();
    assert_eq!(tls.cert, "server.pem");
    assert_eq!(tls.port, 9443);
}

#[test]
fn test_absent_key_builds_nothing() {
    let mut parser = Parser::default();
    parser.bind(tls_port_path(), &["tls-port"]);
    let mut config = ServerConfig::default();
    let outcome = parser.parse(&args(&[]), &mut config);
    assert!(outcome.is_success());
    assert!(config.listener.tls.is_none());
}

#[test]
fn test_node_without_constructor_is_unbound() {
    let mut parser = Parser::default();
    parser.bind(upstream_host_path(), &["upstream"]);
    let mut config = ServerConfig::default();
    let outcome = parser.parse(&args(&["--upstream", "10.0.0.1"]), &mut config);

    assert_eq!(outcome.result, MappingResult::UNBOUND);
    assert!(config.listener.upstream.is_none());
    let report = outcome.report("listener.upstream.host").unwrap();
    assert_eq!(report.result, MappingResult::UNBOUND);
}

#[test]
fn test_existing_node_without_constructor_binds() {
    let mut parser = Parser::default();
    parser.bind(upstream_host_path(), &["upstream"]);
    let mut config = ServerConfig::default();
    config.listener.upstream = Some(Upstream {
        host: "localhost".to_string(),
    });
    let outcome = parser.parse(&args(&["--upstream", "10.0.0.1"]), &mut config);

    assert!(outcome.is_success());
    assert_eq!(config.listener.upstream.unwrap().host, "10.0.0.1");
}
