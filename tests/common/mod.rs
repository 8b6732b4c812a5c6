//! Common fixtures and helpers for integration tests

#![allow(dead_code)]

use optbind::{Field, Member, Parser, Path};
use strum_macros::{AsRefStr, EnumIter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, AsRefStr)]
pub enum Mode {
    #[default]
    Fast,
    Safe,
    Paranoid,
}

optbind::enum_target!(Mode);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tls {
    pub cert: String,
    pub port: u16,
}

/// Has no default value, so it cannot be built when absent
#[derive(Debug, Clone, PartialEq)]
pub struct Upstream {
    pub host: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listener {
    pub tls: Option<Tls>,
    pub upstream: Option<Upstream>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerConfig {
    pub name: String,
    pub workers: i32,
    pub verbose: bool,
    pub ports: Vec<u16>,
    pub mode: Mode,
    pub tags: Vec<String>,
    pub listener: Listener,
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn name_path() -> optbind::PropertyPath<ServerConfig, String> {
    Path::root().field(Field::new("name", |c: &mut ServerConfig, v: String| c.name = v))
}

pub fn workers_path() -> optbind::PropertyPath<ServerConfig, i32> {
    Path::root().field(Field::new("workers", |c: &mut ServerConfig, v: i32| c.workers = v))
}

pub fn ports_path() -> optbind::PropertyPath<ServerConfig, Vec<u16>> {
    Path::root().field(Field::new("ports", |c: &mut ServerConfig, v: Vec<u16>| c.ports = v))
}

pub fn tls_port_path() -> optbind::PropertyPath<ServerConfig, u16> {
    Path::root()
        .member(Member::inline(
            "listener",
            |c: &ServerConfig| &c.listener,
            |c: &mut ServerConfig| &mut c.listener,
        ))
        .member(Member::lazy(
            "tls",
            |l: &Listener| &l.tls,
            |l: &mut Listener| &mut l.tls,
        ))
        .field(Field::new("port", |t: &mut Tls, v: u16| t.port = v))
}

pub fn upstream_host_path() -> optbind::PropertyPath<ServerConfig, String> {
    Path::root()
        .member(Member::inline(
            "listener",
            |c: &ServerConfig| &c.listener,
            |c: &mut ServerConfig| &mut c.listener,
        ))
        .member(Member::optional(
            "upstream",
            |l: &Listener| &l.upstream,
            |l: &mut Listener| &mut l.upstream,
        ))
        .field(Field::new("host", |u: &mut Upstream, v: String| u.host = v))
}

/// A parser with the common server bindings declared
pub fn server_parser() -> Parser<ServerConfig> {
    let mut parser = Parser::default();
    parser.bind(name_path(), &["name", "n"]);
    parser.bind(workers_path(), &["workers", "w"]);
    parser.bind(
        Path::root().field(Field::new("verbose", |c: &mut ServerConfig, v: bool| c.verbose = v)),
        &["verbose", "v"],
    );
    parser.bind(ports_path(), &["port", "p"]);
    parser.bind(
        Path::root().field(Field::new("mode", |c: &mut ServerConfig, v: Mode| c.mode = v)),
        &["mode"],
    );
    parser
}
