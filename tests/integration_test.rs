//! Integration tests for gcms-compare
//!
//! These tests run the full pipeline from report files on disk to exported
//! tables.

use gcms_compare::prelude::*;
use gcms_compare::schema::{KEY_FORMAT_VERSION, KEY_SAMPLES, KEY_SKIPPED_FILES};
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const ARABICA: &str = r#"Area Percent Report
Data File: C:\chem\arabica_01.D
Sample Name: arabica

"Peak","R.T.","First scan","Max scan","Last scan","PK TY","Height","Area","% of total"
1,2.112,110,118,130,"BV",45210,812331,12.40
2,3.415,301,309,322,"VV",120044,2543221,38.82
3,5.104,602,611,630,"PV",n/a,903311,13.79
4,7.804,901,915,930,"VB",22011,2290001,34.99

"PK","RT","Area Pct","Library/ID","Ref","CAS","Qual"
1,2.112,12.40,"2-Methylfuran",1021,"000534-22-5",90
,,,"Furan, 2-methyl-",1022,"000534-22-5",72
2,3.415,38.82,"""Furfural""",2210,"000098-01-1",94
4,7.804,34.99,"CAFFEINE",9932,"000058-08-2",97

End of Report
"#;

const ROBUSTA: &str = r#""Peak","R.T.","Height","Area"
1,2.120,40000,700000
2,3.420,90000,1900000
3,7.810,52000,5100000
4,9.900,1500,9000
"PK","RT","Library/ID","CAS","Qual"
1,2.120,"(+)-2-Methylfuran","000534-22-5",88
2,3.420,"Furfural (1)","000098-01-1",91
3,7.810,"Caffeine","000058-08-2",98
4,9.900,"Octamethylcyclotetrasiloxane","000556-67-2",80
"#;

const PEAKS_ONLY: &str = "\"Peak\",\"R.T.\",\"Height\",\"Area\"\n1,2.5,10,100\n2,4.0,20,200\n";

fn write_reports(dir: &Path, reports: &[(&str, &str)]) -> Vec<PathBuf> {
    reports
        .iter()
        .map(|(name, text)| {
            let path = dir.join(name);
            fs::write(&path, text).unwrap();
            path
        })
        .collect()
}

fn uploads(paths: &[PathBuf]) -> Vec<Upload> {
    paths.iter().map(|p| Upload::from_path(p).unwrap()).collect()
}

/// Test the complete pipeline from files to corpus
#[test]
fn test_batch_from_disk() {
    let dir = tempdir().unwrap();
    let paths = write_reports(
        dir.path(),
        &[
            ("arabica_01.csv", ARABICA),
            ("garbage.csv", "this is not a report\n"),
            ("robusta_01.csv", ROBUSTA),
        ],
    );

    let outcome = analyze_batch(&uploads(&paths), &BatchConfig::default()).unwrap();
    let corpus = &outcome.corpus;

    let samples: Vec<&str> = corpus.samples().iter().map(|s| &**s).collect();
    assert_eq!(samples, vec!["arabica_01", "robusta_01"]);
    assert_eq!(corpus.len(), 8);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].name, "garbage.csv");
    assert_eq!(outcome.skipped[0].reason, ParseError::MissingPeakSection);

    // peak 3 of arabica has no library hit
    let arabica: Vec<&CorpusRecord> = corpus.sample_records("arabica_01").collect();
    assert_eq!(arabica[2].record.identifier(), UNKNOWN);
    assert_eq!(arabica[2].record.peak.height, None);
    assert!(!arabica[2].is_identified());

    // first library row wins over the continuation row
    assert_eq!(arabica[0].record.identifier(), "2-Methylfuran");
    assert_eq!(arabica[0].compound.as_str(), "Methylfuran");

    let compounds: Vec<&str> = corpus.compounds().into_iter().collect();
    assert_eq!(
        compounds,
        vec![
            "Caffeine",
            "Furfural",
            "Methylfuran",
            "Octamethylcyclotetrasiloxane"
        ]
    );

    let summary = corpus.summary();
    assert_eq!(summary.samples, 2);
    assert_eq!(summary.identified_peaks, 7);
}

#[test]
fn test_identified_subset_excludes_peaks_only_sample() {
    let outcome = analyze_batch(
        &[
            Upload::new("arabica.csv", ARABICA),
            Upload::new("blank.csv", PEAKS_ONLY),
        ],
        &BatchConfig::default(),
    )
    .unwrap();

    assert_eq!(outcome.corpus.samples().len(), 2);
    assert!(outcome
        .corpus
        .identified()
        .all(|r| r.sample() == "arabica"));

    let traces = overlay_traces(&outcome.corpus, Abundance::Area);
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[1].points, vec![(2.5, 100.0), (4.0, 200.0)]);
}

#[test]
fn test_heatmap_and_pca() {
    let outcome = analyze_batch(
        &[
            Upload::new("arabica.csv", ARABICA),
            Upload::new("robusta.csv", ROBUSTA),
        ],
        &BatchConfig::default(),
    )
    .unwrap();

    let heatmap = pivot_heatmap(&outcome.corpus, &HeatmapOptions::default()).unwrap();
    assert_eq!(heatmap.compounds(), ["Caffeine", "Furfural", "Methylfuran"]);
    assert_eq!(heatmap.row(0), [2290001.0, 5100000.0]);

    let pca = compute_pca(&outcome.corpus).unwrap();
    assert_eq!(pca.samples.len(), 2);
    // two samples span a single direction
    assert!((pca.explained_variance_ratio[0] - 1.0).abs() < 1e-9);
}

#[test]
fn test_csv_export_round_trip() {
    let dir = tempdir().unwrap();
    let outcome = analyze_batch(
        &[
            Upload::new("arabica.csv", ARABICA),
            Upload::new("robusta.csv", ROBUSTA),
        ],
        &BatchConfig::default(),
    )
    .unwrap();

    let path = dir.path().join("corpus.csv");
    let written =
        write_corpus_csv(&outcome.corpus, RowSelection::All, File::create(&path).unwrap()).unwrap();
    assert_eq!(written, 8);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], columns::SAMPLE);
    assert_eq!(&headers[5], columns::COMPOUND);
    assert!(headers.iter().any(|h| h == "CAS"));
    assert!(headers.iter().any(|h| h == "% of total"));

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 8);
    assert_eq!(&rows[1][5], "Furfural");
    assert_eq!(&rows[2][5], UNKNOWN);
    assert_eq!(&rows[2][3], "");
}

#[test]
fn test_parquet_export() {
    let dir = tempdir().unwrap();
    let outcome = analyze_batch(
        &[
            Upload::new("arabica.csv", ARABICA),
            Upload::new("empty.csv", ""),
        ],
        &BatchConfig::default(),
    )
    .unwrap();

    let path = dir.path().join("corpus.parquet");
    let stats = write_corpus_parquet(&path, &outcome).unwrap();
    assert_eq!(stats.rows_written, 4);
    assert_eq!(stats.identified_written, 3);

    let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
    let file_metadata = reader.metadata().file_metadata();
    assert_eq!(file_metadata.num_rows(), 4);
    assert_eq!(file_metadata.schema_descr().num_columns(), 10);

    let kv = file_metadata.key_value_metadata().unwrap();
    let value = |key: &str| {
        kv.iter()
            .find(|e| e.key == key)
            .and_then(|e| e.value.clone())
            .unwrap()
    };
    assert_eq!(value(KEY_FORMAT_VERSION), CORPUS_FORMAT_VERSION);
    assert_eq!(value(KEY_SAMPLES), r#"["arabica"]"#);
    assert!(value(KEY_SKIPPED_FILES).contains("empty.csv"));
}

#[test]
fn test_batch_limit() {
    let uploads: Vec<Upload> = (0..=MAX_BATCH_FILES)
        .map(|i| Upload::new(format!("s{i}.csv"), PEAKS_ONLY))
        .collect();
    assert!(matches!(
        analyze_batch(&uploads, &BatchConfig::default()),
        Err(BatchError::TooManyFiles { count: 21, limit: 20 })
    ));
}

#[test]
fn test_session_replaces_corpus() {
    let mut session = AnalysisSession::new(BatchConfig::default());
    session.stage(vec![Upload::new("arabica.csv", ARABICA)]);
    let first = session.analyze().unwrap();

    session.stage(vec![
        Upload::new("arabica.csv", ARABICA),
        Upload::new("robusta.csv", ROBUSTA),
    ]);
    let second = session.analyze().unwrap();

    // earlier readers keep their snapshot
    assert_eq!(first.samples().len(), 1);
    assert_eq!(second.samples().len(), 2);
    assert_eq!(session.corpus().unwrap().len(), 8);
}
