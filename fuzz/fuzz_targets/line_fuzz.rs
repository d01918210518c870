//! Line validator fuzz target: feed arbitrary bytes through the reader and validator.
//! Validation must not panic, and every non-skipped line is either valid or carries errors.
//! Build with: cargo fuzz run line_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let validator = mintcheck::Validator::new(mintcheck::ValidatorConfig::at(1_760_000_000_000));
    let mut report = mintcheck::Report::new();
    let read = mintcheck::validate_reader(&validator, data, "fuzz", &mut report, |_, outcome| {
        if let mintcheck::LineOutcome::Invalid(errors) = outcome {
            assert!(!errors.is_empty());
        }
    });
    if let Ok(lines) = read {
        assert_eq!(report.lines_read(), lines);
    }
    let _ = report.check_completeness();
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run line_fuzz");
}
