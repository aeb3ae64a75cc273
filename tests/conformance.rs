//! Fixture-driven grammar conformance tests.
//!
//! Fixtures live in `tests/data/`: files named `y_*.json` must parse and
//! survive a minimized round trip, files named `n_*.json` must be rejected.

use glob::glob;
use std::fs;
use treeson::{parse, serialize, Format};

#[test]
fn run_conformance_fixtures() {
    let paths = glob("tests/data/*.json").expect("Failed to read glob pattern");
    let mut accepted = 0;
    let mut rejected = 0;

    for entry in paths {
        let path = entry.expect("Failed to resolve fixture path");
        let name = path
            .file_name()
            .expect("fixture has a file name")
            .to_string_lossy()
            .into_owned();
        let content = fs::read_to_string(&path).expect("Failed to read fixture");

        if name.starts_with("y_") {
            match parse(&content) {
                Ok(value) => {
                    let minimized = serialize(&value, Format::Minimized);
                    let reparsed = parse(&minimized).unwrap_or_else(|e| {
                        panic!("{name}: minimized output failed to re-parse:\n{e}")
                    });
                    assert_eq!(reparsed, value, "{name}: round trip changed the value");
                    accepted += 1;
                }
                Err(e) => panic!("{name}: expected accept, got:\n{e}"),
            }
        } else if name.starts_with("n_") {
            assert!(
                parse(&content).is_err(),
                "{name}: expected reject, but it parsed"
            );
            rejected += 1;
        } else {
            panic!("{name}: fixture names must start with y_ or n_");
        }
    }

    println!("Accepted {accepted} documents, rejected {rejected}");
    assert!(accepted > 0, "no y_ fixtures found");
    assert!(rejected > 0, "no n_ fixtures found");
}
