use crate::connector::Error;
use std::io::{BufRead, Read};
use std::time::Duration;

/// Host value which makes the connector ask for the broker on stdin.
pub const HOST_FROM_STDIN: &str = "FROM_STDIN";

const MAX_HOST_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
pub struct ConnectorOptions {
    /// The MQTT client id, defaults to a random ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "cli", arg(long, env))]
    pub client_id: Option<String>,

    /// The MQTT's servers/brokers hostname, `FROM_STDIN` to read it from stdin
    #[cfg_attr(feature = "cli", arg(long, env))]
    pub host: String,

    /// The MQTT's server/brokers port, defaults to 1883 without TLS and 8883 with TLS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "cli", arg(long, env))]
    pub port: Option<u16>,

    /// Connect using TLS
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    #[cfg_attr(feature = "cli", arg(long, env))]
    pub tls: bool,

    #[serde(default = "default_keep_alive")]
    #[serde(with = "humantime_serde")]
    #[cfg_attr(feature = "cli", arg(long, env, value_parser = DurationValueParser, default_value = "5s"))]
    pub keep_alive: Duration,

    /// Time to wait before polling the connection again after it failed
    #[serde(default = "default_reconnect_delay")]
    #[serde(with = "humantime_serde")]
    #[cfg_attr(feature = "cli", arg(long, env, value_parser = DurationValueParser, default_value = "5s"))]
    pub reconnect_delay: Duration,

    #[serde(default = "default_username")]
    #[cfg_attr(feature = "cli", arg(long, env, default_value = "homeassistant"))]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "cli", arg(long, env))]
    pub password: Option<String>,
}

impl ConnectorOptions {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            client_id: None,
            host: host.into(),
            port: None,
            tls: false,
            keep_alive: default_keep_alive(),
            reconnect_delay: default_reconnect_delay(),
            username: default_username(),
            password: None,
        }
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(if self.tls { 8883 } else { 1883 })
    }

    /// Replace a host of [`HOST_FROM_STDIN`] with the one read from `input`.
    pub fn resolve_host(&mut self, input: impl BufRead) -> Result<(), Error> {
        if self.host == HOST_FROM_STDIN {
            println!("Please enter url of mqtt broker");
            self.host = read_host(input)?;
            println!("Broker url: {}", self.host);
        }
        Ok(())
    }
}

/// Read a single line of at most [`MAX_HOST_LEN`] bytes, keeping printable ASCII only.
fn read_host(input: impl BufRead) -> Result<String, Error> {
    let mut line = Vec::with_capacity(MAX_HOST_LEN);
    input
        .take(MAX_HOST_LEN as u64)
        .read_until(b'\n', &mut line)?;

    let host: String = line
        .iter()
        .take_while(|b| **b != b'\n')
        .filter(|b| b.is_ascii_graphic() || **b == b' ')
        .map(|b| char::from(*b))
        .collect();

    match host.trim() {
        "" => Err(Error::Configuration("empty broker address".into())),
        host => Ok(host.to_string()),
    }
}

#[cfg(feature = "cli")]
#[derive(Clone)]
pub struct DurationValueParser;

#[cfg(feature = "cli")]
impl clap::builder::TypedValueParser for DurationValueParser {
    type Value = Duration;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        _arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        use std::str::FromStr;
        Ok(humantime::Duration::from_str(&value.to_string_lossy())
            .map_err(|_err| clap::Error::new(clap::error::ErrorKind::Format).with_cmd(cmd))?
            .into())
    }
}

fn default_keep_alive() -> Duration {
    Duration::from_secs(5)
}

fn default_reconnect_delay() -> Duration {
    Duration::from_secs(5)
}

fn default_username() -> String {
    "homeassistant".to_string()
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn test_defaults() {
        let options: ConnectorOptions =
            serde_json::from_value(json!({"host": "broker.local"})).unwrap();

        assert_eq!(options, ConnectorOptions::new("broker.local"));
        assert_eq!(options.port(), 1883);
        assert_eq!(options.username, "homeassistant");
        assert_eq!(options.keep_alive, Duration::from_secs(5));
    }

    #[test]
    fn test_tls_port() {
        let options: ConnectorOptions = serde_json::from_value(json!({
            "host": "broker.local",
            "tls": true,
            "reconnect_delay": "30s",
        }))
        .unwrap();

        assert_eq!(options.port(), 8883);
        assert_eq!(options.reconnect_delay, Duration::from_secs(30));
    }

    #[test]
    fn test_host_kept() {
        let mut options = ConnectorOptions::new("broker.local");
        options.resolve_host(Cursor::new("ignored\n")).unwrap();
        assert_eq!(options.host, "broker.local");
    }

    #[test]
    fn test_host_from_stdin() {
        let mut options = ConnectorOptions::new(HOST_FROM_STDIN);
        options
            .resolve_host(Cursor::new("10.0.0.2\x07\nrest"))
            .unwrap();
        assert_eq!(options.host, "10.0.0.2");
    }

    #[test]
    fn test_host_from_stdin_truncated() {
        let mut input = Cursor::new("a".repeat(200));
        assert_eq!(read_host(&mut input).unwrap().len(), MAX_HOST_LEN);
        assert_eq!(input.position(), MAX_HOST_LEN as u64);
    }

    #[test]
    fn test_host_from_stdin_non_ascii() {
        let host = read_host(Cursor::new("br\u{f6}ker.local\n")).unwrap();
        assert_eq!(host, "brker.local");
    }

    #[test]
    fn test_host_from_stdin_empty() {
        let mut options = ConnectorOptions::new(HOST_FROM_STDIN);
        assert!(matches!(
            options.resolve_host(Cursor::new("\n")),
            Err(Error::Configuration(_))
        ));
    }
}
