use super::*;
use crate::normalize::{CompoundName, Strictness};
use crate::report::{parse_report, ParseError};
use proptest::prelude::*;

const COFFEE: &str = "\"Peak\",\"R.T.\",\"Height\",\"Area\"
1,2.10,100,1000
2,3.20,200,2000
3,4.30,300,3000
\"PK\",\"RT\",\"Library/ID\"
1,2.10,\"1-Butanol\"
2,3.20,\"12\"
";

const TEA: &str = "\"Peak\",\"R.T.\",\"Height\",\"Area\"
1,2.12,150,1500
2,5.00,50,500
\"PK\",\"RT\",\"Library/ID\"
1,2.12,\"BUTANOL\"
2,5.00,\"Limonene (1)\"
";

fn upload(name: &str, text: &str) -> Upload {
    Upload::new(name, text.as_bytes().to_vec())
}

#[test]
fn test_assemble_keeps_every_row() {
    let sets = vec![
        parse_report("coffee.csv", COFFEE).unwrap(),
        parse_report("tea.csv", TEA).unwrap(),
    ];
    let corpus = assemble(sets);

    assert_eq!(corpus.len(), 5);
    assert_eq!(corpus.samples().len(), 2);
    assert_eq!(&*corpus.samples()[0], "coffee");
    assert_eq!(&*corpus.samples()[1], "tea");

    let compounds: Vec<&CompoundName> = corpus.records().iter().map(|r| &r.compound).collect();
    assert_eq!(compounds[0], &CompoundName::Canonical("Butanol".into()));
    assert_eq!(compounds[1], &CompoundName::Unidentified);
    assert_eq!(compounds[2], &CompoundName::Unidentified);
    assert_eq!(compounds[3], &CompoundName::Canonical("Butanol".into()));
    assert_eq!(compounds[4], &CompoundName::Canonical("Limonene".into()));
}

#[test]
fn test_identified_subset() {
    let corpus = assemble(vec![
        parse_report("coffee.csv", COFFEE).unwrap(),
        parse_report("tea.csv", TEA).unwrap(),
    ]);

    assert_eq!(corpus.identified_len(), 3);
    assert!(corpus.identified().all(CorpusRecord::is_identified));
    let compounds: Vec<&str> = corpus.compounds().into_iter().collect();
    assert_eq!(compounds, vec!["Butanol", "Limonene"]);

    let summary = corpus.summary();
    assert_eq!(summary.samples, 2);
    assert_eq!(summary.total_peaks, 5);
    assert_eq!(summary.identified_peaks, 3);
    assert_eq!(summary.unique_compounds, 2);
}

#[test]
fn test_unknown_library_hits_are_unidentified() {
    let text = "\"Peak\",\"R.T.\",\"Height\",\"Area\"
1,1.00,10,100
2,2.00,20,200
3,3.00,30,300
4,4.00,40,400
\"PK\",\"RT\",\"Library/ID\"
1,1.00,\"Unknown\"
2,2.00,\"Hexanal\"
4,4.00,\"UNKNOWN\"
";
    let corpus = assemble(vec![parse_report("blank.csv", text).unwrap()]);

    let identified: Vec<bool> = corpus.records().iter().map(CorpusRecord::is_identified).collect();
    assert_eq!(identified, vec![false, true, false, false]);
    assert_eq!(corpus.records()[0].record.identifier(), "Unknown");
    assert_eq!(corpus.records()[3].record.identifier(), "UNKNOWN");

    let compounds: Vec<&str> = corpus.compounds().into_iter().collect();
    assert_eq!(compounds, vec!["Hexanal"]);
    assert_eq!(corpus.identified_len(), 1);
}

#[test]
fn test_sample_records() {
    let corpus = assemble(vec![
        parse_report("coffee.csv", COFFEE).unwrap(),
        parse_report("tea.csv", TEA).unwrap(),
    ]);
    let peaks: Vec<u32> = corpus.sample_records("tea").map(|r| r.record.peak.peak).collect();
    assert_eq!(peaks, vec![1, 2]);
    assert_eq!(corpus.sample_records("missing").count(), 0);
}

#[test]
fn test_batch_rejects_too_many_files() {
    let uploads: Vec<Upload> = (0..21)
        .map(|i| upload(&format!("s{i}.csv"), COFFEE))
        .collect();
    match analyze_batch(&uploads, &BatchConfig::default()) {
        Err(BatchError::TooManyFiles { count, limit }) => {
            assert_eq!(count, 21);
            assert_eq!(limit, MAX_BATCH_FILES);
        }
        other => panic!("expected TooManyFiles, got {other:?}"),
    }

    let uploads: Vec<Upload> = (0..20)
        .map(|i| upload(&format!("s{i}.csv"), COFFEE))
        .collect();
    let outcome = analyze_batch(&uploads, &BatchConfig::default()).unwrap();
    assert_eq!(outcome.corpus.samples().len(), 20);
}

#[test]
fn test_batch_limit_is_capped() {
    let config = BatchConfig {
        max_files: 50,
        ..Default::default()
    };
    assert_eq!(config.file_limit(), MAX_BATCH_FILES);

    let config = BatchConfig {
        max_files: 2,
        ..Default::default()
    };
    let uploads = vec![upload("a.csv", COFFEE), upload("b.csv", TEA), upload("c.csv", TEA)];
    assert!(matches!(
        analyze_batch(&uploads, &config),
        Err(BatchError::TooManyFiles { count: 3, limit: 2 })
    ));
}

#[test]
fn test_batch_skips_malformed_file() {
    let uploads = vec![
        upload("coffee.csv", COFFEE),
        upload("broken.csv", "nothing to see here\n"),
        upload("tea.csv", TEA),
    ];
    let outcome = analyze_batch(&uploads, &BatchConfig::default()).unwrap();

    assert_eq!(outcome.corpus.samples().len(), 2);
    assert_eq!(outcome.corpus.len(), 5);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].name, "broken.csv");
    assert_eq!(outcome.skipped[0].reason, ParseError::MissingPeakSection);
}

#[test]
fn test_batch_with_no_usable_files() {
    assert!(matches!(
        analyze_batch(&[], &BatchConfig::default()),
        Err(BatchError::NoFiles)
    ));

    let uploads = vec![
        upload("a.csv", ""),
        upload("b.csv", "\"Peak\",\"R.T.\"\n"),
    ];
    match analyze_batch(&uploads, &BatchConfig::default()) {
        Err(BatchError::EmptyBatch { skipped }) => {
            assert_eq!(skipped.len(), 2);
            assert_eq!(skipped[1].reason, ParseError::EmptyPeakData);
        }
        other => panic!("expected EmptyBatch, got {other:?}"),
    }
}

#[test]
fn test_batch_decodes_invalid_utf8() {
    let mut content = b"\"Peak\",\"R.T.\"\n1,1.0\n\"PK\",\"RT\",\"Library/ID\"\n1,1.0,\"Caf".to_vec();
    content.extend_from_slice(&[0xff, 0xfe]);
    content.extend_from_slice(b"ine\"\n");
    let outcome = analyze_batch(&[Upload::new("x.csv", content)], &BatchConfig::default()).unwrap();
    assert_eq!(outcome.corpus.len(), 1);
    assert!(outcome.corpus.records()[0].is_identified());
}

#[test]
fn test_batch_uses_configured_strictness() {
    let text = "\"Peak\",\"R.T.\"\n1,1.0\n\"PK\",\"RT\",\"Library/ID\"\n1,1.0,\"Octanal [NIST]\"\n";
    let strict = BatchConfig {
        strictness: Strictness::Strict,
        ..Default::default()
    };
    let outcome = analyze_batch(&[upload("a.csv", text)], &strict).unwrap();
    assert_eq!(outcome.corpus.strictness(), Strictness::Strict);
    assert_eq!(
        outcome.corpus.records()[0].compound,
        CompoundName::Canonical("Octanal".into())
    );
}

#[test]
fn test_session_lifecycle() {
    let mut session = AnalysisSession::new(BatchConfig::default());
    assert!(!session.is_analyzed());
    assert!(session.corpus().is_none());

    session.stage(vec![upload("coffee.csv", COFFEE), upload("bad.csv", "")]);
    assert_eq!(session.staged().len(), 2);

    let corpus = session.analyze().unwrap();
    assert!(session.is_analyzed());
    assert!(session.analyzed_at().is_some());
    assert_eq!(corpus.len(), 3);
    assert_eq!(session.skipped().len(), 1);

    // staging does not replace the analyzed corpus
    session.stage(vec![upload("tea.csv", TEA)]);
    assert_eq!(session.corpus().unwrap().len(), 3);

    session.stage(Vec::new());
    assert!(session.analyze().is_err());
    assert!(!session.is_analyzed());

    session.stage(vec![upload("tea.csv", TEA)]);
    session.analyze().unwrap();
    session.clear();
    assert!(!session.is_analyzed());
    assert!(session.staged().is_empty());
    assert!(session.analyzed_at().is_none());
}

proptest! {
    #[test]
    fn test_row_count_is_sum_of_parsed_peaks(counts in prop::collection::vec(1usize..15, 1..8)) {
        let uploads: Vec<Upload> = counts
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let mut text = String::from("\"Peak\",\"R.T.\",\"Area\"\n");
                for peak in 1..=*n {
                    text.push_str(&format!("{peak},{}.5,{}\n", peak, peak * 10));
                }
                upload(&format!("sample_{i}.csv"), &text)
            })
            .collect();

        let outcome = analyze_batch(&uploads, &BatchConfig::default()).unwrap();
        prop_assert_eq!(outcome.corpus.len(), counts.iter().sum::<usize>());
        prop_assert_eq!(outcome.corpus.identified_len(), 0);
        prop_assert_eq!(outcome.corpus.samples().len(), counts.len());
    }
}
