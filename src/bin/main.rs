use serde::Serialize;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

use bgpkit_extensions::models::*;
use bgpkit_extensions::parser::{parse_destinations, parse_link_state_attribute};
use bgpkit_extensions::rib::{RibSupport, RibSupportRegistry};
use bgpkit_extensions::PeerConstraint;
use bytes::Bytes;
use clap::{Args, Parser, Subcommand};

/// bgpkit-extensions is a simple cli tool that decodes Link-State, Labeled-Unicast and VPN data.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    #[clap(subcommand)]
    command: Command,

    /// Output as JSON objects
    #[clap(long, global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[clap(long, global = true)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Address family identifier, e.g. 1 (IPv4), 2 (IPv6) or 16388 (BGP-LS)
    #[clap(long)]
    afi: u16,

    /// Subsequent address family identifier, e.g. 4, 71, 72 or 128
    #[clap(long)]
    safi: u8,

    /// NLRI carry Add-Path path identifiers
    #[clap(long)]
    add_path: bool,

    /// JSON peer constraint file, overrides --add-path
    #[clap(long)]
    peer_config: Option<PathBuf>,

    /// NLRI bytes in hex
    #[clap(name = "HEX")]
    hex: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode the NLRI field of an MP_REACH/MP_UNREACH attribute
    Nlri(TableArgs),
    /// Decode NLRI and print the route key of each destination
    RouteKey(TableArgs),
    /// Decode a BGP-LS attribute value
    Attr {
        /// NLRI type: 1 node, 2 link, 3 IPv4 prefix, 4 IPv6 prefix
        #[clap(short = 't', long)]
        nlri_type: u16,

        /// Protocol id: 1/2 IS-IS, 3 OSPFv2, 4 direct, 5 static, 6 OSPFv3, 7 BGP
        #[clap(short = 'p', long)]
        protocol: u8,

        /// Attribute bytes in hex
        #[clap(name = "HEX")]
        hex: String,
    },
}

fn decode_hex(input: &str) -> Bytes {
    let cleaned: String = input.split_whitespace().collect();
    match hex::decode(cleaned.trim_start_matches("0x")) {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) => {
            eprintln!("invalid hex input: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_constraint(path: &PathBuf) -> PeerConstraint {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()));
    match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("cannot load peer config {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn table_of(args: &TableArgs) -> TableKey {
    match (Afi::try_from(args.afi), Safi::try_from(args.safi)) {
        (Ok(afi), Ok(safi)) => TableKey::new(afi, safi),
        _ => {
            eprintln!("unsupported AFI/SAFI {}/{}", args.afi, args.safi);
            std::process::exit(1);
        }
    }
}

fn add_path_of(args: &TableArgs, table: &TableKey) -> bool {
    match &args.peer_config {
        Some(path) => {
            let constraint = load_constraint(path);
            if !constraint.is_table_supported(table) {
                eprintln!("table {} is not enabled in {}", table, path.display());
                std::process::exit(1);
            }
            constraint.supports_add_path(table)
        }
        None => args.add_path,
    }
}

fn output<T: Serialize + std::fmt::Debug>(value: &T, opts: &Opts) {
    let output_str = if opts.json {
        let val = json!(value);
        if opts.pretty {
            serde_json::to_string_pretty(&val).unwrap()
        } else {
            val.to_string()
        }
    } else if opts.pretty {
        format!("{:#?}", value)
    } else {
        format!("{:?}", value)
    };
    let mut stdout = std::io::stdout();
    if let Err(e) = writeln!(stdout, "{}", &output_str) {
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }
}

fn exit_on_error<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    match &opts.command {
        Command::Nlri(args) => {
            let table = table_of(args);
            let add_path = add_path_of(args, &table);
            let destinations =
                exit_on_error(parse_destinations(decode_hex(&args.hex), table, add_path));
            for destination in destinations.to_destinations() {
                output(&destination, &opts);
            }
        }
        Command::RouteKey(args) => {
            let table = table_of(args);
            let add_path = add_path_of(args, &table);
            let registry = RibSupportRegistry::with_defaults();
            let support = exit_on_error(registry.get(&table));
            let destinations =
                exit_on_error(parse_destinations(decode_hex(&args.hex), table, add_path));
            for destination in destinations.to_destinations() {
                let route_id = exit_on_error(support.route_id(&destination, add_path));
                output(&route_id, &opts);
            }
        }
        Command::Attr {
            nlri_type,
            protocol,
            hex,
        } => {
            let attr = exit_on_error(parse_link_state_attribute(
                decode_hex(hex),
                NlriType::from(*nlri_type),
                ProtocolId::from(*protocol),
            ));
            match attr {
                Some(attr) => output(&attr, &opts),
                None => {
                    eprintln!("no attribute layout for NLRI type {}", nlri_type);
                    std::process::exit(1);
                }
            }
        }
    }
}
