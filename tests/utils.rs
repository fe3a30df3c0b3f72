use memkv_server::server::{ServerConfig, ServerNode};
use rocket::local::blocking::Client;
use std::net::{IpAddr, Ipv4Addr};

pub fn test_config() -> ServerConfig {
    ServerConfig {
        address: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        report_interval: 5,
        shutdown_grace: 5,
    }
}

pub fn launch_node() -> Client {
    let node = ServerNode::new(test_config());
    Client::tracked(node.build()).expect("valid rocket instance")
}
