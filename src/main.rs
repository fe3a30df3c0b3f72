use clap::{App, Arg};
use log::{error, info};
use memkv_server::server::{ServerConfig, ServerNode};
use std::net::IpAddr;

fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

#[rocket::main]
async fn main() {
    let matches = App::new("memkv-server")
        .version("1.0")
        .about("In-memory key-value store served over HTTP")
        .arg(
            Arg::with_name("port")
                .long("port")
                .takes_value(true)
                .default_value("4000")
                .help("TCP port to listen on"),
        )
        .arg(
            Arg::with_name("address")
                .long("address")
                .takes_value(true)
                .default_value("127.0.0.1")
                .help("Address to bind"),
        )
        .arg(
            Arg::with_name("report_interval")
                .long("report-interval")
                .takes_value(true)
                .default_value("5")
                .help("Seconds between status report log lines"),
        )
        .arg(
            Arg::with_name("shutdown_grace")
                .long("shutdown-grace")
                .takes_value(true)
                .default_value("5")
                .help("Seconds allowed for in-flight requests to finish on shutdown"),
        )
        .get_matches();
    let _ = setup_logger();

    let port = matches.value_of("port").unwrap().parse::<u16>().unwrap();
    let address = matches
        .value_of("address")
        .unwrap()
        .parse::<IpAddr>()
        .unwrap();
    let report_interval = matches
        .value_of("report_interval")
        .unwrap()
        .parse::<u64>()
        .unwrap();
    let shutdown_grace = matches
        .value_of("shutdown_grace")
        .unwrap()
        .parse::<u32>()
        .unwrap();

    let config = ServerConfig {
        address,
        port,
        report_interval,
        shutdown_grace,
    };
    let node = ServerNode::new(config);

    info!("server starting on http://{}:{}", address, port);
    if let Err(e) = node.build().launch().await {
        error!("server terminated abnormally: {}", e);
        std::process::exit(1);
    }
    info!("server stopped cleanly");
}
