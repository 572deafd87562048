use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("build directory not found") {
        push_hint(
            &mut out,
            "Pass the CMake build directory that contains `Testing/`.",
        );
        push_hint(&mut out, "Run `ctest -T Test` first so CTest writes its XML report.");
    }

    if haystack.contains("invalid coverage input") {
        push_hint(
            &mut out,
            "Pass an LCOV `.info` file or a directory containing `coverage.info`, `lcov.info` or `*.gcov` files.",
        );
    }

    if haystack.contains("failed to run gcov") {
        push_hint(&mut out, "Install gcov and verify it with `gcov --version`.");
    }

    if haystack.contains("no such file or directory") || haystack.contains("not found") {
        push_hint(&mut out, "Verify the input path exists and is readable.");
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("unknown severity") {
        push_hint(
            &mut out,
            "Valid severities are `error`, `warning`, `note` and `information`.",
        );
    }

    if haystack.contains("toml") && (haystack.contains("parse") || haystack.contains("invalid")) {
        push_hint(
            &mut out,
            "Check `cireport.toml` syntax and key names.",
        );
    }

    if haystack.contains("expected") && haystack.contains("json") {
        push_hint(
            &mut out,
            "Inputs must be JSON written by `cireport tests` or `cireport coverage`.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}
