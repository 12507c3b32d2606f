//! Integration tests for the file datasource: CSV in, pipeline, CSV/JSONL out.

use std::fs;
use std::path::Path;

use tempojoin::tempojoin::datasource::file::{
    FileDataSink, FileDataSource, FileFormat, FileSinkConfig, FileSourceConfig,
};
use tempojoin::tempojoin::datasource::traits::{DataSink, DataSource};
use tempojoin::tempojoin::engine::intersect::OUTPUT_COLUMNS;
use tempojoin::tempojoin::engine::pipeline::TemporalJoinPipeline;
use tempojoin::tempojoin::engine::types::{FieldValue, TemporalRecord};

async fn read_all(path: &Path) -> Vec<TemporalRecord> {
    let config = FileSourceConfig::new(path.display().to_string(), FileFormat::Csv);
    let source = FileDataSource::new(config);
    let mut reader = source.create_reader().await.unwrap();

    let mut records = Vec::new();
    loop {
        let batch = reader.read().await.unwrap();
        if batch.is_empty() {
            break;
        }
        records.extend(batch);
    }
    records
}

#[tokio::test]
async fn test_csv_reader_names_fields_from_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dept.csv");
    fs::write(
        &path,
        "customer,department,active,eff_start_date,eff_end_date\n\
         1,Sales,true,2020-01-01,2020-12-31\n",
    )
    .unwrap();

    let records = read_all(&path).await;
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].field_or_null("department"),
        &FieldValue::String("Sales".to_string())
    );
    assert_eq!(
        records[0].field_or_null("eff_start_date"),
        &FieldValue::String("2020-01-01".to_string())
    );
}

#[tokio::test]
async fn test_csv_reader_quoting_and_empty_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("addr.csv");
    fs::write(
        &path,
        "customer,address,eff_start_date,eff_end_date\n\
         1,\"12 Main St, Apt 4\",2020-01-01,2020-12-31\n\
         2,,2020-01-01,2020-12-31\n",
    )
    .unwrap();

    let records = read_all(&path).await;
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].field_or_null("address"),
        &FieldValue::String("12 Main St, Apt 4".to_string())
    );
    assert_eq!(records[1].field_or_null("address"), &FieldValue::Null);
}

#[tokio::test]
async fn test_reader_batches_until_drained() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dept.csv");
    fs::write(
        &path,
        "customer,department,active,eff_start_date,eff_end_date\n\
         1,X,true,2020-01-01,2020-12-31\n\
         2,Y,true,2020-01-01,2020-12-31\n\
         3,Z,false,2020-01-01,2020-12-31\n",
    )
    .unwrap();

    let config =
        FileSourceConfig::new(path.display().to_string(), FileFormat::Csv).with_batch_size(2);
    let source = FileDataSource::new(config);
    let mut reader = source.create_reader().await.unwrap();

    assert!(reader.has_more().await.unwrap());
    assert_eq!(reader.read().await.unwrap().len(), 2);
    assert_eq!(reader.read().await.unwrap().len(), 1);
    assert!(reader.read().await.unwrap().is_empty());
    assert!(!reader.has_more().await.unwrap());
}

#[tokio::test]
async fn test_full_pipeline_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let dept = dir.path().join("dept.csv");
    let addr = dir.path().join("addr.csv");
    let mobile = dir.path().join("mobile.csv");
    let output = dir.path().join("result.csv");

    fs::write(
        &dept,
        "customer,department,active,eff_start_date,eff_end_date\n\
         1,X,true,2020-01-01,2020-12-31\n",
    )
    .unwrap();
    fs::write(
        &addr,
        "customer,address,eff_start_date,eff_end_date\n\
         1,A1,2020-01-01,2020-06-30\n\
         1,A2,2020-07-01,2020-12-31\n",
    )
    .unwrap();
    fs::write(
        &mobile,
        "customer,mobile_no,eff_start_date,eff_end_date\n\
         1,555,2020-01-01,2020-12-31\n",
    )
    .unwrap();

    let pipeline = TemporalJoinPipeline::new();
    let result = pipeline
        .execute(
            read_all(&dept).await,
            read_all(&addr).await,
            read_all(&mobile).await,
        )
        .unwrap();

    let sink_config = FileSinkConfig::new(output.display().to_string(), FileFormat::Csv)
        .with_columns(&OUTPUT_COLUMNS);
    let sink = FileDataSink::new(sink_config);
    let mut writer = sink.create_writer().await.unwrap();
    writer.write_batch(result).await.unwrap();
    writer.flush().await.unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "customer,department,address,mobile_no,eff_start_date,eff_end_date,active"
    );
    assert_eq!(lines[1], "1,X,A1,555,2020-01-01,2020-06-30,true");
    assert_eq!(lines[2], "1,X,A2,555,2020-07-01,2020-12-31,true");
}

#[tokio::test]
async fn test_sink_replaces_prior_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.csv");

    // A longer relation from an earlier run occupies the destination
    fs::write(&output, "stale\nstale\nstale\nstale\nstale\nstale\n").unwrap();

    let sink_config = FileSinkConfig::new(output.display().to_string(), FileFormat::Csv)
        .with_columns(&["customer"]);
    let sink = FileDataSink::new(sink_config);
    let mut writer = sink.create_writer().await.unwrap();
    writer
        .write_batch(vec![TemporalRecord::from_pairs(vec![(
            "customer",
            FieldValue::String("1".to_string()),
        )])])
        .await
        .unwrap();
    writer.flush().await.unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, "customer\n1\n");
}

#[tokio::test]
async fn test_null_cells_round_trip_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.csv");

    let sink_config = FileSinkConfig::new(output.display().to_string(), FileFormat::Csv)
        .with_columns(&["customer", "address", "mobile_no"]);
    let sink = FileDataSink::new(sink_config);
    let mut writer = sink.create_writer().await.unwrap();
    writer
        .write_batch(vec![TemporalRecord::from_pairs(vec![
            ("customer", FieldValue::String("2".to_string())),
            ("address", FieldValue::Null),
            ("mobile_no", FieldValue::Null),
        ])])
        .await
        .unwrap();
    writer.flush().await.unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, "customer,address,mobile_no\n2,,\n");
}

#[tokio::test]
async fn test_jsonl_sink_writes_parseable_lines() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.jsonl");

    let sink_config = FileSinkConfig::new(output.display().to_string(), FileFormat::JsonLines);
    let sink = FileDataSink::new(sink_config);
    let mut writer = sink.create_writer().await.unwrap();
    writer
        .write_batch(vec![TemporalRecord::from_pairs(vec![
            ("customer", FieldValue::String("1".to_string())),
            ("address", FieldValue::Null),
        ])])
        .await
        .unwrap();
    writer.flush().await.unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(parsed["customer"], serde_json::json!("1"));
    assert_eq!(parsed["address"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_csv_sink_without_columns_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.csv");

    let sink = FileDataSink::new(FileSinkConfig::new(
        output.display().to_string(),
        FileFormat::Csv,
    ));
    assert!(sink.create_writer().await.is_err());
    // Nothing was created at the destination
    assert!(!output.exists());
}
