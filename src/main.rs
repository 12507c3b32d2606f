//! tempojoin - temporal join over customer history CSV files
//!
//! Reads the department, address, and mobile-number history relations,
//! cascades the two interval joins, and writes the result relation with its
//! intersected validity windows.
//!
//! ## Usage:
//! ```bash
//! tempojoin --department cust_department.csv \
//!           --address cust_address.csv \
//!           --mobile cust_mobileno.csv \
//!           --output final_result.csv
//! ```

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::error::Error;
use std::path::{Path, PathBuf};

use tempojoin::tempojoin::datasource::file::{
    FileDataSink, FileDataSource, FileFormat, FileSinkConfig, FileSourceConfig,
};
use tempojoin::tempojoin::datasource::traits::{DataSink, DataSource};
use tempojoin::tempojoin::engine::intersect::OUTPUT_COLUMNS;
use tempojoin::tempojoin::engine::pipeline::TemporalJoinPipeline;
use tempojoin::tempojoin::engine::types::TemporalRecord;

#[derive(Debug, Parser)]
#[command(
    name = "tempojoin",
    about = "Temporal interval join over customer history relations"
)]
struct Args {
    /// Department history CSV (driving relation)
    #[arg(long)]
    department: PathBuf,

    /// Address history CSV
    #[arg(long)]
    address: PathBuf,

    /// Mobile-number history CSV
    #[arg(long)]
    mobile: PathBuf,

    /// Output file path (replaced if it exists)
    #[arg(long)]
    output: PathBuf,

    /// Field delimiter for input and output
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Output format: csv or jsonl
    #[arg(long, default_value = "csv")]
    format: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let format: FileFormat = args.format.parse().map_err(|e: String| {
        error!("{}", e);
        e
    })?;

    let department = read_relation(&args.department, args.delimiter).await?;
    let address = read_relation(&args.address, args.delimiter).await?;
    let mobile = read_relation(&args.mobile, args.delimiter).await?;
    info!(
        "loaded relations: department={} address={} mobile={}",
        department.len(),
        address.len(),
        mobile.len()
    );

    let pipeline = TemporalJoinPipeline::new();
    let result = match pipeline.execute(department, address, mobile) {
        Ok(result) => result,
        Err(e) => {
            error!("temporal join failed: {}", e);
            return Err(Box::new(e) as Box<dyn Error + Send + Sync>);
        }
    };
    info!("temporal join produced {} rows", result.len());

    let sink_config = FileSinkConfig::new(args.output.display().to_string(), format)
        .with_delimiter(args.delimiter)
        .with_columns(&OUTPUT_COLUMNS);
    let sink = FileDataSink::new(sink_config);
    let mut writer = sink.create_writer().await?;
    writer.write_batch(result).await?;
    writer.flush().await?;
    info!("wrote output relation to {}", args.output.display());

    Ok(())
}

/// Read one input relation to completion
async fn read_relation(
    path: &Path,
    delimiter: char,
) -> Result<Vec<TemporalRecord>, Box<dyn Error + Send + Sync>> {
    let config =
        FileSourceConfig::new(path.display().to_string(), FileFormat::Csv).with_delimiter(delimiter);
    let source = FileDataSource::new(config);
    let mut reader = source.create_reader().await?;

    let mut records = Vec::new();
    loop {
        let batch = reader.read().await?;
        if batch.is_empty() {
            break;
        }
        records.extend(batch);
    }
    Ok(records)
}
