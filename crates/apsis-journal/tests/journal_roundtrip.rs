//! End-to-end journal tests: write records, read them back, and
//! reject corrupt input.

use std::io::BufReader;

use apsis_core::StateSnapshot;
use apsis_journal::{JournalError, Player, Record, Recorder};
use apsis_test_utils::random_snapshot;

fn write_journal(records: &[Record]) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut recorder = Recorder::new(&mut buf).unwrap();
    for record in records {
        recorder.write_record(record.clone()).unwrap();
    }
    assert_eq!(recorder.records_written(), records.len() as u64);
    drop(recorder);
    buf
}

#[test]
fn roundtrip_multiple_records() {
    let records: Vec<Record> = (0..5)
        .map(|tick| Record {
            tick,
            snapshot: random_snapshot(tick, 3, 8),
        })
        .collect();
    let buf = write_journal(&records);

    let mut player = Player::new(BufReader::new(buf.as_slice())).unwrap();
    for expected in &records {
        let got = player.next_record().unwrap().unwrap();
        assert_eq!(&got, expected);
    }
    assert!(player.next_record().unwrap().is_none());
    assert_eq!(player.records_read(), records.len() as u64);
}

#[test]
fn roundtrip_with_small_chunks() {
    let record = Record {
        tick: 7,
        snapshot: random_snapshot(7, 4, 32),
    };
    let mut buf = Vec::new();
    let mut recorder = Recorder::with_geometry(&mut buf, 8, 2).unwrap();
    recorder.write_record(record.clone()).unwrap();
    drop(recorder);

    let mut player = Player::with_geometry(BufReader::new(buf.as_slice()), 8, 2).unwrap();
    assert_eq!(player.next_record().unwrap().unwrap(), record);
    assert!(player.next_record().unwrap().is_none());
}

#[test]
fn record_iterator_yields_all_records() {
    let records: Vec<Record> = (0..3)
        .map(|tick| Record {
            tick,
            snapshot: random_snapshot(tick + 100, 2, 4),
        })
        .collect();
    let buf = write_journal(&records);

    let player = Player::new(BufReader::new(buf.as_slice())).unwrap();
    let got: Vec<Record> = player.records().map(|r| r.unwrap()).collect();
    assert_eq!(got, records);
}

#[test]
fn empty_journal_has_no_records() {
    let buf = write_journal(&[]);
    let mut player = Player::new(BufReader::new(buf.as_slice())).unwrap();
    assert!(player.next_record().unwrap().is_none());
}

#[test]
fn bad_magic_rejected() {
    let result = Player::new(BufReader::new(&b"4D55524B01\n"[..]));
    assert!(matches!(result, Err(JournalError::InvalidMagic)));
}

#[test]
fn bad_version_rejected() {
    // Valid magic, version 99 (0x63).
    let result = Player::new(BufReader::new(&b"4150534A63\n"[..]));
    assert!(matches!(
        result,
        Err(JournalError::UnsupportedVersion { found: 99 })
    ));
}

#[test]
fn truncated_stream_rejected() {
    let result = Player::new(BufReader::new(&b""[..]));
    assert!(matches!(result, Err(JournalError::InvalidMagic)));
}

#[test]
fn invalid_hex_digit_rejected() {
    let buf = write_journal(&[Record {
        tick: 1,
        snapshot: StateSnapshot::empty(),
    }]);
    let mut text = String::from_utf8(buf).unwrap();
    // Corrupt the first digit of the first content line.
    let content_start = text.find('\n').unwrap() + 1;
    text.replace_range(content_start..content_start + 1, "G");

    let mut player = Player::new(BufReader::new(text.as_bytes())).unwrap();
    assert!(matches!(
        player.next_record(),
        Err(JournalError::InvalidHexDigit { digit: b'G' })
    ));
}

#[test]
fn missing_terminator_rejected() {
    let buf = write_journal(&[Record {
        tick: 1,
        snapshot: random_snapshot(1, 2, 4),
    }]);
    let text = String::from_utf8(buf).unwrap();
    // Drop the blank terminator line after the last record.
    let truncated = text.trim_end_matches('\n');

    let mut player = Player::new(BufReader::new(truncated.as_bytes())).unwrap();
    assert!(matches!(
        player.next_record(),
        Err(JournalError::MalformedRecord { .. })
    ));
}

#[test]
fn truncated_record_body_rejected() {
    let buf = write_journal(&[Record {
        tick: 1,
        snapshot: random_snapshot(1, 4, 64),
    }]);
    let text = String::from_utf8(buf).unwrap();
    // Remove the last content line of the record but keep the blank
    // terminator: the decoder hits end-of-stream mid-snapshot.
    let mut lines: Vec<&str> = text.lines().collect();
    assert!(lines.len() > 3, "test needs a multi-chunk record");
    lines.remove(lines.len() - 2);
    let corrupted = lines.join("\n") + "\n";

    let mut player = Player::new(BufReader::new(corrupted.as_bytes())).unwrap();
    assert!(matches!(
        player.next_record(),
        Err(JournalError::Io(_))
    ));
}

#[test]
fn extra_content_line_in_record_rejected() {
    let buf = write_journal(&[Record {
        tick: 1,
        snapshot: random_snapshot(1, 2, 4),
    }]);
    let text = String::from_utf8(buf).unwrap();
    // Splice a spurious hex line between the record's last chunk and
    // its blank terminator.
    let corrupted = text.replacen("\n\n", "\nDEADBEEF\n\n", 1);

    let mut player = Player::new(BufReader::new(corrupted.as_bytes())).unwrap();
    assert!(matches!(
        player.next_record(),
        Err(JournalError::MalformedRecord { .. })
    ));
}

#[test]
fn extra_blank_lines_between_records_tolerated() {
    let records: Vec<Record> = (0..2)
        .map(|tick| Record {
            tick,
            snapshot: random_snapshot(tick, 1, 2),
        })
        .collect();
    let buf = write_journal(&records);
    let text = String::from_utf8(buf).unwrap();
    let padded = text.replacen("\n\n", "\n\n\n\n", 1);

    let mut player = Player::new(BufReader::new(padded.as_bytes())).unwrap();
    assert_eq!(player.next_record().unwrap().unwrap(), records[0]);
    assert_eq!(player.next_record().unwrap().unwrap(), records[1]);
    assert!(player.next_record().unwrap().is_none());
}
