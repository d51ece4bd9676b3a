use super::*;

// --- is_error_line ---

#[test]
fn error_keyword_any_case() {
    assert!(is_error_line("Error: undefined reference to foo"));
    assert!(is_error_line("src/main.cpp:12:5: error: expected ';'"));
    assert!(is_error_line("*** [.pio/build/esp32/firmware.elf] ERROR 1"));
}

#[test]
fn failed_keyword_any_case() {
    assert!(is_error_line("Upload FAILED"));
    assert!(is_error_line("esp32dev  FAILED  00:00:04.120"));
    assert!(is_error_line("Compilation failed."));
}

#[test]
fn keywords_only_match_as_whole_words() {
    assert!(!is_error_line("errorcode=0"));
    assert!(!is_error_line("Checking for errors"));
    assert!(!is_error_line("terror alert"));
    assert!(!is_error_line("failedover"));
    assert!(!is_error_line("unfailed"));
    // underscore is a word character, so this is one token
    assert!(!is_error_line("log_error_count = 3"));
}

#[test]
fn keywords_next_to_punctuation_match() {
    assert!(is_error_line("[error]"));
    assert!(is_error_line("build-failed"));
    assert!(is_error_line("error:"));
}

#[test]
fn red_sequences_match_without_keywords() {
    assert!(is_error_line("\x1b[91mundefined symbol\x1b[0m"));
    assert!(is_error_line("\x1b[31mboom\x1b[0m"));
    assert!(is_error_line("\x1b[1;31mboom\x1b[0m"));
}

#[test]
fn other_colors_do_not_match() {
    assert!(!is_error_line("\x1b[32mSUCCESS\x1b[0m"));
    assert!(!is_error_line("\x1b[33mwarning: unused variable\x1b[0m"));
    assert!(!is_error_line("\x1b[1;32mok\x1b[0m"));
}

#[test]
fn plain_chatter_does_not_match() {
    assert!(!is_error_line("Compiling .pio/build/esp32/src/main.cpp.o"));
    assert!(!is_error_line("RAM:   [=         ]   6.5% (used 21288 bytes)"));
    assert!(!is_error_line(""));
}

// --- strip_ansi ---

#[test]
fn strip_removes_all_sgr_sequences() {
    assert_eq!(strip_ansi("\x1b[31mred\x1b[0m"), "red");
    assert_eq!(strip_ansi("\x1b[1;32mgreen\x1b[m text"), "green text");
    assert_eq!(strip_ansi("\x1b[38;5;196mpalette\x1b[0m"), "palette");
}

#[test]
fn strip_leaves_plain_text_alone() {
    assert_eq!(strip_ansi("no colors here"), "no colors here");
    assert_eq!(strip_ansi("[31m without escape"), "[31m without escape");
}

#[test]
fn strip_leaves_non_sgr_escapes() {
    // cursor movement is not a color code
    assert_eq!(strip_ansi("\x1b[2Kline"), "\x1b[2Kline");
}

#[test]
fn strip_removes_sequences_revealed_by_stripping() {
    assert_eq!(strip_ansi("\x1b\x1b[31m[0mtext"), "text");
}

#[test]
fn strip_is_idempotent() {
    let inputs = [
        "\x1b[91mError:\x1b[0m bad",
        "plain",
        "\x1b[1;31m\x1b[0m",
        "\x1b[33mwarn\x1b[0m and \x1b[31mred",
        "\x1b\x1b[31m[31m nested",
    ];
    for input in inputs {
        let once = strip_ansi(input);
        assert_eq!(strip_ansi(&once), once, "input: {input:?}");
    }
}

// --- extract_errors ---

#[test]
fn extract_keeps_error_lines_in_order() {
    let output = "Compiling main.cpp\n\
                  main.cpp:3: error: 'foo' was not declared\n\
                  Linking\n\
                  *** [firmware.elf] Error 1\n\
                  ========== [FAILED] Took 2.1 seconds ==========\n";
    assert_eq!(
        extract_errors(output),
        vec![
            "main.cpp:3: error: 'foo' was not declared",
            "*** [firmware.elf] Error 1",
            "========== [FAILED] Took 2.1 seconds ==========",
        ]
    );
}

#[test]
fn extract_strips_colors_from_matches() {
    let output = "\x1b[32mok\x1b[0m\n\x1b[31mundefined reference to `setup'\x1b[0m";
    assert_eq!(extract_errors(output), vec!["undefined reference to `setup'"]);
}

#[test]
fn extract_drops_lines_blank_after_stripping() {
    let output = "\x1b[31m\x1b[0m\n\x1b[91m   \x1b[0m\nError: real one";
    assert_eq!(extract_errors(output), vec!["Error: real one"]);
}

#[test]
fn extract_nothing_from_clean_output() {
    assert!(extract_errors("Building\nLinking\nDone\n").is_empty());
    assert!(extract_errors("").is_empty());
}

// --- tail_lines ---

#[test]
fn tail_keeps_last_non_blank_lines() {
    let output: String = (1..=15).map(|i| format!("line {i}\n\n")).collect();
    let tail = tail_lines(&output, 10);
    let expected: Vec<String> = (6..=15).map(|i| format!("line {i}")).collect();
    assert_eq!(tail, expected);
}

#[test]
fn tail_shorter_than_limit_returns_everything() {
    assert_eq!(tail_lines("a\n   \nb\n", 10), vec!["a", "b"]);
}

#[test]
fn tail_keeps_colors() {
    assert_eq!(
        tail_lines("\x1b[32mdone\x1b[0m\n", 10),
        vec!["\x1b[32mdone\x1b[0m"]
    );
}

#[test]
fn tail_of_zero_is_empty() {
    assert!(tail_lines("a\nb", 0).is_empty());
}

// --- normalize_newlines ---

#[test]
fn crlf_becomes_lf() {
    assert_eq!(normalize_newlines("one\r\ntwo\r\n"), "one\ntwo\n");
}

#[test]
fn lone_cr_becomes_lf() {
    assert_eq!(
        normalize_newlines("Writing 10%\rWriting 50%\rdone"),
        "Writing 10%\nWriting 50%\ndone"
    );
}

#[test]
fn crlf_is_one_break_not_two() {
    assert_eq!(normalize_newlines("a\r\n\r\nb"), "a\n\nb");
}

#[test]
fn progress_frames_do_not_join_error_report() {
    let output = normalize_newlines(
        "Uploading 10%\rUploading 50%\rA fatal error occurred: timed out\r\nstep\r\n",
    );
    assert_eq!(
        extract_errors(&output),
        vec!["A fatal error occurred: timed out"]
    );
}

#[test]
fn tail_of_crlf_output_has_no_carriage_returns() {
    let output = normalize_newlines("first\r\nsecond\r\n\r\n");
    assert_eq!(tail_lines(&output, 10), vec!["first", "second"]);
}
