use gst_frame_timeline::parser::envelope::parse_envelope;
use gst_frame_timeline::parser::events::{LineClassifier, PadForm, TraceEvent};
use gst_frame_timeline::parser::timestamp::LogTimestamp;
use gst_frame_timeline::utils::config::AnalyzerConfig;
use gst_frame_timeline::utils::error::ParseError;

fn handoff_line(at: &str, identity: &str, pts: &str) -> String {
    format!(
        "{} 4242 0x1d2e3f0 LOG GST_SCHEDULING gstpad.c:4320:gst_pad_chain_data_unchecked:<{}> calling chainfunction &gst_base_sink_chain with buffer buffer: 0x7f00aa, pts {}, dts 99:99:99.999999999, dur 0:00:00.033333333",
        at, identity, pts
    )
}

#[test]
fn test_envelope_fields() {
    let env = parse_envelope("00:00:01.000000 4242 0xdead INFO hello world").unwrap();
    assert_eq!(env.timestamp, "00:00:01.000000");
    assert_eq!(env.pid, "4242");
    assert_eq!(env.thread_id, "0xdead");
    assert_eq!(env.severity, "INFO");
    assert_eq!(env.message, "hello world");
}

#[test]
fn test_sink_and_src_forms() {
    let classifier = LineClassifier::new(&AnalyzerConfig::default());

    let sink = classifier
        .classify(&handoff_line("00:00:01.000000", "sink1:sinkpad", "00:00:00.033000"))
        .unwrap();
    let src = classifier
        .classify(&handoff_line("00:00:01.010000", "src:decoder0", "00:00:00.033000"))
        .unwrap();

    match (&sink[0], &src[0]) {
        (TraceEvent::Handoff(a), TraceEvent::Handoff(b)) => {
            assert_eq!(a.pad_form, PadForm::Sink);
            assert_eq!((a.stage_name.as_str(), a.stage_instance.as_str()), ("sink", "1"));
            assert_eq!(b.pad_form, PadForm::Src);
            assert_eq!((b.stage_name.as_str(), b.pad_name.as_str()), ("decoder", "src"));
            assert_eq!(a.pts, b.pts);
        }
        _ => panic!("expected two handoffs"),
    }
}

#[test]
fn test_ambiguous_identity_resolves_to_sink_form() {
    let classifier = LineClassifier::new(&AnalyzerConfig::default());
    // `a1:b2` fits both `<elem N:pad>` and `<pad:elem N>`
    let events = classifier
        .classify(&handoff_line("00:00:01.000000", "a1:b2", "00:00:00.033000"))
        .unwrap();

    assert_eq!(events.len(), 1);
    let TraceEvent::Handoff(h) = &events[0] else {
        panic!("expected handoff");
    };
    assert_eq!(h.pad_form, PadForm::Sink);
    assert_eq!(h.stage_name, "a");
    assert_eq!(h.stage_instance, "1");
    assert_eq!(h.pad_name, "b2");
}

#[test]
fn test_sink_match_with_other_function_is_dropped() {
    let classifier = LineClassifier::new(&AnalyzerConfig::default());
    let line = handoff_line("00:00:01.000000", "a1:b2", "00:00:00.033000")
        .replace("gst_pad_chain_data_unchecked", "gst_pad_push_data");

    assert!(classifier.classify(&line).unwrap().is_empty());
}

#[test]
fn test_custom_exclusion() {
    let config = AnalyzerConfig::new().with_excluded_stages(["decoder"]);
    let classifier = LineClassifier::new(&config);

    let line = handoff_line("00:00:01.000000", "src:decoder0", "00:00:00.033000");
    assert!(classifier.classify(&line).unwrap().is_empty());

    // Default exclusion no longer applies
    let line = handoff_line("00:00:01.000000", "mpeg2dec0:sink", "00:00:00.033000");
    assert_eq!(classifier.classify(&line).unwrap().len(), 1);
}

#[test]
fn test_marker_with_free_form_kind() {
    let classifier = LineClassifier::new(&AnalyzerConfig::default());
    let line = "0:00:03.000000000 4242 0x1 INFO GST_PERFORMANCE gstscaler.c:77:gst_scaler_chain:<scaler> gst_scaler_chain checkpoint reached, pts 0:00:00.066666666";

    let events = classifier.classify(line).unwrap();
    let TraceEvent::Marker(m) = &events[0] else {
        panic!("expected marker");
    };
    assert_eq!(m.stage_name, "scaler");
    assert_eq!(m.marker_kind, "checkpoint");
    assert_eq!(m.pts, "0:00:00.066666666");
}

#[test]
fn test_marker_requires_chain_function() {
    let classifier = LineClassifier::new(&AnalyzerConfig::default());
    let line = "0:00:03.000000000 4242 0x1 INFO GST_PERFORMANCE gstscaler.c:77:gst_scaler_loop:<scaler> gst_scaler_loop started, pts 0:00:00.066666666";
    assert!(classifier.classify(line).unwrap().is_empty());
}

#[test]
fn test_prose_after_envelope_yields_nothing() {
    let classifier = LineClassifier::new(&AnalyzerConfig::default());
    let line = "00:00:01.000000 4242 0x1d2e3f0 INFO the decoder is warming up nicely";
    assert!(classifier.classify(line).unwrap().is_empty());
}

#[test]
fn test_malformed_timestamp_only_for_event_lines() {
    let classifier = LineClassifier::new(&AnalyzerConfig::default());

    // Prose with a non-time first token is simply not an event
    assert!(classifier
        .classify("Redistribute latency ... now")
        .unwrap()
        .is_empty());

    let line = handoff_line("25:61:00.000000", "sink1:sinkpad", "00:00:00.033000");
    assert!(matches!(
        classifier.classify(&line),
        Err(ParseError::MalformedTimestamp { .. })
    ));
}

#[test]
fn test_timestamp_display_and_delta() {
    let a = LogTimestamp::parse("0:00:01.000000000").unwrap();
    let b = LogTimestamp::parse("00:00:01.010000").unwrap();
    assert_eq!(a.to_string(), "00:00:01.000000");
    assert_eq!(b.micros_since(&a), 10_000);
}
