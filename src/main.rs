use clap::Parser;
use homeassistant_switch::connector::{Connector, ConnectorOptions};
use homeassistant_switch::model::DeviceIdentity;
use homeassistant_switch::reactor::Reactor;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    connector: ConnectorOptions,

    /// Hardware address identifying this device, random if not set
    #[arg(long, env)]
    device_mac: Option<DeviceIdentity>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut cli = Cli::parse();

    log::info!("Starting up");

    let identity = match cli.device_mac {
        Some(identity) => identity,
        None => {
            let identity = DeviceIdentity::random();
            log::warn!("No device address configured, using a random one");
            identity
        }
    };
    log::info!("Device identity: {identity}");

    cli.connector.resolve_host(std::io::stdin().lock())?;

    let reactor = Reactor::new(identity);
    log::info!(
        "Announcing on {}, commands on {}",
        reactor.topics().config,
        reactor.topics().command
    );

    let connector = Connector::new(cli.connector, reactor);

    tokio::select! {
        _ = connector.run() => {},
        ret = tokio::signal::ctrl_c() => { ret? },
    }

    log::info!("Exiting");

    Ok(())
}
