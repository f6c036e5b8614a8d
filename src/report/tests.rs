use super::*;
use crate::normalize::UNKNOWN;
use proptest::prelude::*;

const PEAKS_ONLY: &str = r#"Area Percent Report
Data File: C:\runs\coffee_01.D

"Peak","R.T.","First scan","Max scan","Last scan","PK TY","Height","Area","% of total"
1,3.412,310,316,330,"BV",125432,2543221,4.21
2,5.120,612,620,641,"VV",98211,1203311,1.99
3,7.804,901,915,930,"PV",n/a,803311,1.33

End of Report
"#;

const WITH_LIBRARY: &str = r#""Peak","R.T.","Height","Area"
3,5.10,500,7000
5,6.20,300,4000
"PK","RT","Area Pct","Library/ID","Ref","CAS","Qual"
3,5.11,63.6,"1-Butanol",1234,"000071-36-3",91
,,,"Butyl alcohol",1235,"000071-36-3",80
9,9.90,1.0,"Hexanal",2000,"000066-25-1",70
"#;

#[test]
fn test_peaks_only_report() {
    let set = parse_report("coffee_01.csv", PEAKS_ONLY).unwrap();

    assert_eq!(&*set.sample, "coffee_01");
    assert_eq!(set.source_name, "coffee_01.csv");
    assert_eq!(set.len(), 3);
    assert!(set.records.iter().all(|r| r.identifier() == UNKNOWN));
    assert!(set.records.iter().all(|r| r.library.is_none()));
    assert!(!set.has_library_matches());

    let first = &set.records[0].peak;
    assert_eq!(first.peak, 1);
    assert_eq!(first.retention_time, 3.412);
    assert_eq!(first.height, Some(125432.0));
    assert_eq!(first.area, Some(2543221.0));
    assert_eq!(first.percentage("% of total"), Some(4.21));
    assert_eq!(first.attribute("PK TY"), Some("BV"));
    assert_eq!(first.attribute("Max scan"), Some("316"));

    // malformed height is missing, the peak survives
    assert_eq!(set.records[2].peak.height, None);
    assert_eq!(set.stats.malformed_cells, 1);
    assert_eq!(set.stats.unmatched_peaks, 3);
}

#[test]
fn test_left_join_on_peak_index() {
    let set = parse_report("wine.txt", WITH_LIBRARY).unwrap();
    assert_eq!(set.len(), 2);

    let matched = &set.records[0];
    assert_eq!(matched.peak.peak, 3);
    assert_eq!(matched.identifier(), "1-Butanol");
    assert_eq!(matched.peak.retention_time, 5.10);
    assert_eq!(matched.peak.height, Some(500.0));
    assert_eq!(matched.peak.area, Some(7000.0));

    let library = matched.library.as_ref().unwrap();
    assert_eq!(library.retention_time, Some(5.11));
    assert_eq!(library.attribute("CAS"), Some("000071-36-3"));
    assert_eq!(library.attribute("Qual"), Some("91"));

    let unmatched = &set.records[1];
    assert_eq!(unmatched.peak.peak, 5);
    assert_eq!(unmatched.identifier(), UNKNOWN);
    assert!(unmatched.library.is_none());
    assert_eq!(unmatched.peak.retention_time, 6.20);
    assert_eq!(unmatched.peak.height, Some(300.0));
    assert_eq!(unmatched.peak.area, Some(4000.0));

    assert_eq!(set.stats.library_rows, 2);
    assert_eq!(set.stats.unmatched_peaks, 1);
}

#[test]
fn test_footer_lines_are_not_rows() {
    let text = "\"Peak\",\"R.T.\",\"Area\"\n1,1.0,10\n\"End of Report\"\nPrinted by operator,2,3\n";
    let set = parse_report("a.csv", text).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.stats.skipped_lines, 2);
}

#[test]
fn test_missing_peak_section() {
    let text = "\"PK\",\"RT\",\"Library/ID\"\n1,2.0,\"Ethanol\"\n";
    assert_eq!(
        parse_report("lib_only.csv", text),
        Err(ParseError::MissingPeakSection)
    );
    assert_eq!(
        parse_report("empty.csv", ""),
        Err(ParseError::MissingPeakSection)
    );
}

#[test]
fn test_empty_peak_data() {
    let header_only = "\"Peak\",\"R.T.\",\"Height\"\n\nEnd of Report\n";
    assert_eq!(
        parse_report("a.csv", header_only),
        Err(ParseError::EmptyPeakData)
    );

    // rows exist but none has a retention time
    let no_rt = "\"Peak\",\"R.T.\",\"Height\"\n1,,100\n2,abc,100\n";
    assert_eq!(parse_report("b.csv", no_rt), Err(ParseError::EmptyPeakData));
}

#[test]
fn test_rows_without_retention_time_are_dropped() {
    let text = "\"Peak\",\"R.T.\",\"Area\"\n1,1.5,10\n2,,20\n3,2.5,30\n";
    let set = parse_report("a.csv", text).unwrap();
    let peaks: Vec<u32> = set.records.iter().map(|r| r.peak.peak).collect();
    assert_eq!(peaks, vec![1, 3]);
    assert_eq!(set.stats.dropped_peaks, 1);
}

#[test]
fn test_ragged_rows() {
    let text = "\"Peak\",\"R.T.\",\"Height\",\"Area\"\n1,1.5\n2,2.5,40\n3,3.5,50,60,extra,extra\n";
    let set = parse_report("a.csv", text).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.records[0].peak.height, None);
    assert_eq!(set.records[1].peak.height, Some(40.0));
    assert_eq!(set.records[2].peak.area, Some(60.0));
    assert!(set.records[2].peak.attributes.is_empty());
}

#[test]
fn test_duplicate_library_keys_keep_first() {
    let text = "\"Peak\",\"R.T.\"\n1,1.0\n\"PK\",\"RT\",\"Library/ID\"\n1,1.0,\"Linalool\"\n1,1.0,\"Geraniol\"\n";
    let set = parse_report("a.csv", text).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.records[0].identifier(), "Linalool");
    assert_eq!(set.stats.duplicate_library_keys, 1);
}

#[test]
fn test_blank_identifier_is_unknown() {
    let text = "\"Peak\",\"R.T.\"\n1,1.0\n\"PK\",\"RT\",\"Library/ID\",\"Qual\"\n1,1.0,,50\n";
    let set = parse_report("a.csv", text).unwrap();
    assert!(set.records[0].library.is_some());
    assert_eq!(set.records[0].raw_identifier(), None);
    assert_eq!(set.records[0].identifier(), UNKNOWN);
}

#[test]
fn test_quoted_identifier_with_comma() {
    let text = "\"Peak\",\"R.T.\"\n1,1.0\n\"PK\",\"RT\",\"Library/ID\",\"CAS\"\n1,1.0,\"Cyclohexane, 1-methyl-\",\"000108-87-2\"\n";
    let set = parse_report("a.csv", text).unwrap();
    assert_eq!(set.records[0].identifier(), "Cyclohexane, 1-methyl-");
    assert_eq!(
        set.records[0].library.as_ref().unwrap().attribute("CAS"),
        Some("000108-87-2")
    );
}

#[test]
fn test_sample_label_policy() {
    let text = "\"Peak\",\"R.T.\"\n1,1.0\n";
    let keep = ReportParser::new(ParserConfig {
        sample_label: SampleLabel::FileName,
    });
    assert_eq!(&*keep.parse("run.01.csv", text).unwrap().sample, "run.01.csv");
    assert_eq!(&*parse_report("run.01.csv", text).unwrap().sample, "run.01");
    assert_eq!(SampleLabel::FileStem.label("noext"), "noext");
}

#[test]
fn test_windows_line_endings() {
    let text = "\"Peak\",\"R.T.\",\"Area\"\r\n1,1.0,5\r\n2,2.0,6\r\n";
    let set = parse_report("a.csv", text).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.records[1].peak.area, Some(6.0));
}

proptest! {
    #[test]
    fn test_parser_never_panics(text in "\\PC{0,400}") {
        let _ = parse_report("fuzz.csv", &text);
    }

    #[test]
    fn test_every_surviving_row_appears_once(
        rows in prop::collection::vec((1u32..500, 0.0f64..60.0, 0usize..6), 1..40)
    ) {
        let mut text = String::from("\"Peak\",\"R.T.\",\"Height\",\"Area\"\n");
        for (peak, rt, width) in &rows {
            let cells = [peak.to_string(), format!("{rt:.3}"), "10".to_string(), "20".to_string(), "x".to_string()];
            let width = (*width).max(2).min(cells.len());
            text.push_str(&cells[..width].join(","));
            text.push('\n');
        }
        let set = parse_report("p.csv", &text).unwrap();
        prop_assert_eq!(set.len(), rows.len());
        for (record, (peak, _, _)) in set.records.iter().zip(&rows) {
            prop_assert_eq!(record.peak.peak, *peak);
        }
    }
}
