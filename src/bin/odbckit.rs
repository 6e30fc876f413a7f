use odbckit::connect_spec::ConnectArgs;
use odbckit::core::db::odbc::shared_client;
use odbckit::keywords::ReservedKeyword;
use odbckit::{constants, Value};
use tracing::info;

const USAGE: &str = "usage: odbckit <dsns | drivers | spec | connect> [--string CONNSTR] [key=value ...]";

/// Turns `key=value` command-line pairs into typed keyword arguments.
fn parse_connect_args(args: &[String]) -> Result<ConnectArgs, String> {
    let mut connect_args = ConnectArgs::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--string" {
            let value = iter.next().ok_or("--string needs a connection string")?;
            connect_args = connect_args.connection_string(value);
            continue;
        }
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{}'", arg))?;
        let value = match ReservedKeyword::parse(key) {
            Some(ReservedKeyword::Timeout) => value
                .parse::<i64>()
                .map(Value::Int)
                .unwrap_or_else(|_| Value::from(value)),
            Some(_) => Value::Bool(matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")),
            None => Value::from(value),
        };
        connect_args = connect_args.keyword(key, value);
    }
    Ok(connect_args)
}

fn run(args: &[String]) -> Result<(), String> {
    let (command, rest) = args.split_first().ok_or(USAGE)?;
    let client = shared_client().map_err(|e| e.to_string())?;

    match command.as_str() {
        "dsns" => {
            for (name, description) in client.data_sources().map_err(|e| e.to_string())? {
                println!("{:<30} {}", name, description);
            }
        }
        "drivers" => {
            for driver in client.drivers().map_err(|e| e.to_string())? {
                println!("{}", driver);
            }
        }
        "spec" => {
            let spec = parse_connect_args(rest)?
                .into_spec()
                .map_err(|e| format!("{}: {}", e.kind(), e))?;
            println!("connection string: {}", spec.connection_string());
            println!("autocommit:        {}", spec.autocommit);
            println!("login timeout:     {}", spec.login_timeout_secs);
            println!("ansi:              {}", spec.use_ansi_fallback);
        }
        "connect" => {
            let connect_args = parse_connect_args(rest)?;
            client
                .connect(connect_args)
                .map_err(|e| format!("{}: {}", e.kind(), e))?;
            println!(
                "Connected (pooling in effect: {})",
                client.pooling_in_effect().unwrap_or(false)
            );
        }
        _ => return Err(USAGE.to_string()),
    }
    Ok(())
}

fn main() {
    // Initialize the logging system using tracing subscriber
    tracing_subscriber::fmt::init();

    info!("Starting odbckit {} (DB-API {})", constants::VERSION, constants::APILEVEL);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
