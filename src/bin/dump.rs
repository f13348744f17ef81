use anyhow::{Context, Result};
use clap::Parser;
use sacd_telemetry::packet::SacdDecoder;
use sacd_telemetry::reader::PacketReader;
use sacd_telemetry::transform::{eclipse_flags, ECLIPSE_THRESHOLD};
use std::path::PathBuf;
use time::macros::format_description;
use time::UtcOffset;

#[derive(Debug, Parser)]
#[command(version, about = "Dump decoded SAC-D telemetry records from a capture file")]
struct Args {
    /// Capture file to read; its length must be a whole number of records
    input: PathBuf,

    /// Render timestamps in UTC instead of the process-local offset
    #[arg(long, default_value_t = false)]
    utc: bool,

    /// Mark records whose bus voltage indicates an eclipse period
    #[arg(long, default_value_t = false)]
    eclipse: bool,

    /// Voltage below which a record counts as eclipse
    #[arg(long, env = "ECLIPSE_THRESHOLD", default_value_t = ECLIPSE_THRESHOLD)]
    threshold: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let decoder = if args.utc {
        SacdDecoder::new(UtcOffset::UTC)
    } else {
        SacdDecoder::local()
    };

    let mut reader =
        PacketReader::open(&args.input).with_context(|| format!("open {:?}", args.input))?;
    let packets = reader.read_all(&decoder)?;
    let flags = eclipse_flags(&packets, args.threshold);

    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    for (packet, in_eclipse) in packets.iter().zip(&flags) {
        let ts = packet.timestamp.format(&format)?;
        let mark = if args.eclipse && *in_eclipse { "  [eclipse]" } else { "" };
        println!("{ts}  {:>8.3} V{mark}", packet.voltage);
    }

    eprintln!("Read {} records from {:?}.", packets.len(), args.input);
    Ok(())
}
