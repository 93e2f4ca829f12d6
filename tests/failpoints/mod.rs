use maplit::hashmap;
use serde_json::json;
use termfreq_filter::docset::AllDocs;
use termfreq_filter::index::{RamSegment, RamSegmentBuilder, SegmentReader};
use termfreq_filter::script::{
    ContainsMultipleLeafFactory, ContainsMultipleParams, FilterLeafFactory,
};
use termfreq_filter::{filter_docset, filter_segments, Executor, FilterError};

fn segment() -> RamSegment {
    let mut segment_builder = RamSegmentBuilder::default();
    segment_builder.add_document([("text", "a a")]);
    segment_builder.add_document([("text", "b")]);
    segment_builder.add_document([("text", "a a a")]);
    segment_builder.build()
}

fn leaf_factory() -> ContainsMultipleLeafFactory {
    let params = hashmap! {
        "field".to_string() => json!("text"),
        "term".to_string() => json!("a"),
        "count".to_string() => json!(2),
    };
    ContainsMultipleLeafFactory::new(ContainsMultipleParams::from_params(&params).unwrap())
}

fn assert_io_error(err: FilterError, msg: &str) {
    assert!(!err.is_validation_error());
    match err {
        FilterError::IoError(io_error) => assert!(io_error.to_string().contains(msg)),
        other => panic!("expected an io error, got {other:?}"),
    }
}

#[test]
fn test_failpoints_open_postings_fails() {
    let _fail_scenario_guard = fail::FailScenario::setup();
    fail::cfg("RamSegment::postings", "return(postings_unavailable)").unwrap();
    let segment = segment();
    let err = leaf_factory().new_instance(&segment).err().unwrap();
    assert_io_error(err, "postings_unavailable");
}

#[test]
fn test_failpoints_seek_fails() {
    let _fail_scenario_guard = fail::FailScenario::setup();
    let segment = segment();
    let mut script = leaf_factory().new_instance(&segment).unwrap();
    // The first seek goes through, the second one fails.
    fail::cfg("VecPostings::seek", "1*off->return(seek_failed)").unwrap();
    script.set_document(0).unwrap();
    assert!(script.execute().unwrap());
    let err = script.set_document(1).unwrap_err();
    assert_io_error(err, "seek_failed");
}

#[test]
fn test_failpoints_term_freq_fails() {
    let _fail_scenario_guard = fail::FailScenario::setup();
    fail::cfg("VecPostings::term_freq", "return(corrupted_freqs)").unwrap();
    let segment = segment();
    let mut script = leaf_factory().new_instance(&segment).unwrap();
    let err = filter_docset(script.as_mut(), &mut AllDocs::new(segment.max_doc())).unwrap_err();
    assert_io_error(err, "corrupted_freqs");
}

#[test]
fn test_failpoints_error_propagates_through_executor() {
    let _fail_scenario_guard = fail::FailScenario::setup();
    fail::cfg("RamSegment::postings", "return(postings_unavailable)").unwrap();
    let segments = vec![segment(), segment()];
    let executor = Executor::multi_thread(2, "failpoints-").unwrap();
    let err = filter_segments(&leaf_factory(), &segments, &executor).unwrap_err();
    assert_io_error(err, "postings_unavailable");
}
