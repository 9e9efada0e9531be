use schema_gzip_ingest::benchmark::benchmark_readers;
use schema_gzip_ingest::ingestion::csv::CsvTableReader;
use schema_gzip_ingest::ingestion::{ReaderBackend, TableReader};
use std::path::Path;

#[test]
fn csv_reader_reads_fixture_verbatim() {
    let table = CsvTableReader::new()
        .read_table(Path::new("tests/fixtures/messy_headers.csv"))
        .unwrap();

    assert_eq!(table.columns, vec!["id", "val ue!"]);
    assert_eq!(table.rows[1], vec!["2".to_string(), "has, comma".to_string()]);
}

#[cfg(feature = "polars_reader")]
#[test]
fn polars_reader_matches_csv_reader_cell_for_cell() {
    use schema_gzip_ingest::ingestion::polars::PolarsTableReader;

    let path = Path::new("tests/fixtures/id_value.csv");
    let csv = CsvTableReader::new().read_table(path).unwrap();
    let polars = PolarsTableReader::new().read_table(path).unwrap();

    assert_eq!(polars, csv);
}

#[test]
fn benchmark_times_every_available_backend() {
    let backends = ReaderBackend::available();
    let timings = benchmark_readers("tests/fixtures/id_value.csv", &backends, b',', 2).unwrap();

    assert_eq!(timings.len(), backends.len());
    for (timing, backend) in timings.iter().zip(&backends) {
        assert_eq!(timing.backend, *backend);
        assert_eq!(timing.rows, 3);
        assert_eq!(timing.columns, 2);
        assert!(timing.to_string().contains("seconds"));
    }
}

#[test]
fn benchmark_propagates_read_errors() {
    assert!(benchmark_readers("tests/fixtures/does_not_exist.csv", &[ReaderBackend::Csv], b',', 1).is_err());
}
