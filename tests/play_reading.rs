use prompter::dialogue::segment;
use prompter::normalize::normalize_lines;
use prompter::play::Play;
use tempfile::TempDir;

const CORIOLANUS_SAMPLE: &str = "\
Coriolanus by William Shakespeare
ACT 1
=====================
Scene 1
[Enter a company of mutinous Citizens]
FIRST CITIZEN
Before we proceed any further, hear me speak.
ALL
Speak, speak.
Scene 2
[Enter Martius]
MARTIUS
Thanks. What's the matter, you dissentious rogues?
ACT 2
Scene 1
MENENIUS
The augurer tells me we shall have news tonight.
";

/// Test parsing the documented example shape
#[test]
fn test_parse_yields_addressable_scenes() {
    let lines = [
        "Hamlet", "ACT 1", "Scene 1", "HAMLET", "To be.", "Scene 2", "HORATIO", "Indeed.",
    ];
    let play = Play::from_lines(&lines);
    assert_eq!(play.scene(1, 1), Some("HAMLET\nTo be."));
    assert_eq!(play.scene(1, 2), Some("HORATIO\nIndeed."));
}

/// Test a full load from disk, separator rows excluded
#[test]
fn test_load_play_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("coriolanus.txt");
    std::fs::write(&path, CORIOLANUS_SAMPLE).unwrap();

    let play = Play::load(&path).expect("load should succeed");
    assert_eq!(play.title(), "Coriolanus by William Shakespeare");
    assert_eq!(play.display_title(), "Coriolanus");
    assert_eq!(play.scene_count(), 3);
    assert_eq!(
        play.scene(1, 1),
        Some(
            "[Enter a company of mutinous Citizens]\nFIRST CITIZEN\nBefore we proceed any further, hear me speak.\nALL\nSpeak, speak."
        )
    );
    assert_eq!(play.scene(9, 9), None);
}

/// Test that lookup misses stay misses across every act
#[test]
fn test_absent_scene_lookup_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("coriolanus.txt");
    std::fs::write(&path, CORIOLANUS_SAMPLE).unwrap();

    let play = Play::load(&path).expect("load should succeed");
    assert_eq!(play.scene(1, 3), None);
    assert_eq!(play.scene(3, 1), None);
    assert_eq!(play.scene(0, 0), None);
}

/// Test segmentation of a scene pulled from a parsed play
#[test]
fn test_segment_scene_into_speeches() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("coriolanus.txt");
    std::fs::write(&path, CORIOLANUS_SAMPLE).unwrap();

    let play = Play::load(&path).expect("load should succeed");
    let scene = play.scene(1, 1).expect("scene should exist");
    let units = segment(scene);

    assert_eq!(units.len(), 3);
    assert_eq!(units[0].lines, vec!["[Enter a company of mutinous Citizens]"]);
    assert_eq!(
        units[1].lines,
        vec!["FIRST CITIZEN", "Before we proceed any further, hear me speak."]
    );
    assert_eq!(units[2].lines, vec!["ALL", "Speak, speak."]);
}

/// Test the documented two-speech segmentation example
#[test]
fn test_segment_minimal_example() {
    let units = segment("HAMLET\nTo be or not to be.\nHORATIO\nWell said.");
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].text(), "HAMLET\nTo be or not to be.");
    assert_eq!(units[1].text(), "HORATIO\nWell said.");
}

/// Test normalize-then-parse over a wrapped raw source
#[test]
fn test_raw_source_reads_end_to_end() {
    let raw = [
        "Coriolanus by William Shakespeare",
        "ACT 1",
        "Scene 1",
        "FIRST CITIZEN",
        "You are all resolved rather to die than",
        "to famish?",
        "",
        "",
        "",
        "ALL",
        "Resolved, resolved.",
    ];
    let play = Play::from_lines(&normalize_lines(&raw));

    let scene = play.scene(1, 1).expect("scene should exist");
    assert_eq!(
        scene,
        "FIRST CITIZEN\nYou are all resolved rather to die than to famish?\n\nALL\nResolved, resolved."
    );

    let units = segment(scene);
    assert_eq!(units.len(), 2);
    assert_eq!(
        units[0].lines,
        vec!["FIRST CITIZEN", "You are all resolved rather to die than to famish?", ""]
    );
}
