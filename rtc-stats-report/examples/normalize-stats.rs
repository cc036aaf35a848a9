use anyhow::Result;
use clap::Parser;
use env_logger::Target;
use log::{debug, info};
use rtc_stats_report::{
    RTCRawStatsSnapshot, RTCStatsCategory, RTCStatsClassifierBuilder, RTCStatsNormalizerBuilder,
};
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "normalize-stats")]
#[command(author = "Rusty Rain <y@liu.mx>")]
#[command(version = "0.0.0")]
#[command(about = "Normalizes a getStats() JSON snapshot into a categorized report.")]
struct Cli {
    #[arg(short, long)]
    debug: bool,
    #[arg(short, long, default_value_t = format!("INFO"))]
    log_level: String,
    #[arg(short, long, default_value_t = format!(""))]
    input_file: String,
    #[arg(short, long, default_value_t = format!(""))]
    output_log_file: String,
    /// Only print the records of this category, e.g. RTCInboundRtpVideoStreams.
    #[arg(short, long)]
    category: Option<String>,
    #[arg(long)]
    pretty: bool,
    #[arg(long)]
    no_media_type_fallback: bool,
    #[arg(long)]
    no_legacy_track_split: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = log::LevelFilter::from_str(&cli.log_level)?;
    if cli.debug {
        env_logger::Builder::new()
            .target(if !cli.output_log_file.is_empty() {
                Target::Pipe(Box::new(
                    OpenOptions::new()
                        .create(true)
                        .write(true)
                        .truncate(true)
                        .open(&cli.output_log_file)?,
                ))
            } else {
                Target::Stderr
            })
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{}:{} [{}] {} - {}",
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.level(),
                    chrono::Local::now().format("%H:%M:%S.%6f"),
                    record.args()
                )
            })
            .filter(None, log_level)
            .init();
    }

    let mut json = String::new();
    if cli.input_file.is_empty() {
        std::io::stdin().read_to_string(&mut json)?;
    } else {
        OpenOptions::new()
            .read(true)
            .open(&cli.input_file)?
            .read_to_string(&mut json)?;
    }

    let snapshot = RTCRawStatsSnapshot::from_json_str(&json)?;
    debug!("read {} raw stats records", snapshot.len());

    let normalizer = RTCStatsNormalizerBuilder::new()
        .with_classifier(
            RTCStatsClassifierBuilder::new()
                .with_media_type_fallback(!cli.no_media_type_fallback)
                .with_legacy_track_split(!cli.no_legacy_track_split)
                .build(),
        )
        .build();
    let report = normalizer.normalize(&snapshot)?;

    for (category, records) in report.iter() {
        if !records.is_empty() {
            info!("{}: {} ({})", category, records.len(), category.description());
        }
    }
    for dropped in report.dropped() {
        info!(
            "dropped {:?} of type {:?}: {}",
            dropped.id, dropped.stats_type, dropped.reason
        );
    }

    let output = match &cli.category {
        Some(key) => {
            let category = RTCStatsCategory::from_str(key)?;
            to_json(report.get(category), cli.pretty)?
        }
        None => to_json(&report, cli.pretty)?,
    };
    println!("{output}");

    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
