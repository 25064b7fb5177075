//! core::directives
//!
//! Line scanners for the directive families the flattener rewrites.
//!
//! # Design
//!
//! Directive handling is a small hand-rolled scanner rather than one
//! monolithic regex. Each family is recognized and transformed in
//! isolation:
//!
//! - **Import directives** - `import ...;` starting a line, possibly
//!   spanning multiple physical lines, terminated by the first `;`
//! - **License directives** - comment lines beginning
//!   `SPDX-License-Identifier:`
//! - **Encoder pragma** - `pragma experimental ABIEncoderV2;` lines
//!
//! # Invariants
//!
//! - Stripping an import never consumes content past its terminator; the
//!   line terminator itself is preserved
//! - An `import` with no `;` before end of input is left untouched
//! - Non-directive content is preserved byte-for-byte

/// Remove every import directive from a source body.
///
/// A directive is a line whose first token is the `import` keyword followed
/// by whitespace, running to the first `;` (which may sit on a later
/// physical line). Trailing spaces after the `;` are removed as well; the
/// final line terminator stays in place.
///
/// # Example
///
/// ```
/// use solflat::core::directives::strip_imports;
///
/// let src = "pragma solidity ^0.8.13;\nimport \"./IMarket.sol\";\ncontract Market {}\n";
/// assert_eq!(
///     strip_imports(src),
///     "pragma solidity ^0.8.13;\n\ncontract Market {}\n"
/// );
/// ```
pub fn strip_imports(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut pos = 0;
    while pos < source.len() {
        match import_directive_len(&source[pos..]) {
            Some(len) => pos += len,
            None => {
                let line_end = source[pos..]
                    .find('\n')
                    .map(|i| pos + i + 1)
                    .unwrap_or(source.len());
                out.push_str(&source[pos..line_end]);
                pos = line_end;
            }
        }
    }
    out
}

/// Extract the target path of every import directive, in source order.
///
/// The target is the last string literal inside the directive, which covers
/// all Solidity import forms:
///
/// ```
/// use solflat::core::directives::import_paths;
///
/// let src = concat!(
///     "import \"./IMarket.sol\";\n",
///     "import {Math} from \"../utils/Math.sol\";\n",
///     "import * as oz from '@openzeppelin/contracts/utils/Context.sol';\n",
/// );
/// assert_eq!(
///     import_paths(src),
///     vec![
///         "./IMarket.sol",
///         "../utils/Math.sol",
///         "@openzeppelin/contracts/utils/Context.sol",
///     ]
/// );
/// ```
pub fn import_paths(source: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut pos = 0;
    while pos < source.len() {
        match import_directive_len(&source[pos..]) {
            Some(len) => {
                if let Some(path) = quoted_path(&source[pos..pos + len]) {
                    paths.push(path);
                }
                pos += len;
            }
            None => {
                pos = source[pos..]
                    .find('\n')
                    .map(|i| pos + i + 1)
                    .unwrap_or(source.len());
            }
        }
    }
    paths
}

/// Length of the import directive starting at the beginning of `text`, or
/// `None` when `text` (taken as a line start) does not begin one.
///
/// The returned length covers the line's indentation, the directive through
/// its `;`, and any trailing spaces or tabs before the line terminator.
fn import_directive_len(text: &str) -> Option<usize> {
    let indent = text.len() - text.trim_start_matches([' ', '\t']).len();
    let rest = &text[indent..];
    let after_kw = rest.strip_prefix("import")?;
    // The keyword must be followed by whitespace (a line break counts);
    // identifiers like `import_queue` are not directives.
    if !after_kw.chars().next().is_some_and(|c| c.is_whitespace()) {
        return None;
    }
    let semi = after_kw.find(';')?;
    let mut end = indent + "import".len() + semi + 1;
    let tail = &text[end..];
    end += tail.len() - tail.trim_start_matches([' ', '\t']).len();
    Some(end)
}

/// The last string literal inside a directive span.
fn quoted_path(directive: &str) -> Option<String> {
    let chars: Vec<char> = directive.chars().collect();
    let mut last = None;
    let mut i = 0;
    while i < chars.len() {
        let quote = chars[i];
        if quote == '"' || quote == '\'' {
            if let Some(close) = (i + 1..chars.len()).find(|&j| chars[j] == quote) {
                last = Some(chars[i + 1..close].iter().collect::<String>());
                i = close + 1;
                continue;
            }
        }
        i += 1;
    }
    last
}

/// Rewrite every line beginning a license identifier directive so it no
/// longer matches the directive keyword the toolchain treats as
/// authoritative.
///
/// `// SPDX-License-Identifier: MIT` becomes `// License-Identifier: MIT`;
/// the aggregate header for the whole artifact is prepended separately by
/// the assembler.
pub fn rewrite_license_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if begins_license_directive(line) {
            out.push_str(&line.replacen("SPDX-License-Identifier:", "License-Identifier:", 1));
        } else {
            out.push_str(line);
        }
    }
    out
}

fn begins_license_directive(line: &str) -> bool {
    let rest = line.trim_start();
    match rest.strip_prefix("//") {
        Some(rest) => rest.trim_start().starts_with("SPDX-License-Identifier:"),
        None => false,
    }
}

/// Keep the first `pragma experimental ABIEncoderV2;` line and delete every
/// later occurrence, wherever it originated.
///
/// The pragma is only meaningful once per compiled unit. The first
/// occurrence is preserved verbatim, including its original spacing.
pub fn dedup_encoder_pragma(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut seen = false;
    for line in text.split_inclusive('\n') {
        if is_encoder_pragma(line) {
            if seen {
                continue;
            }
            seen = true;
        }
        out.push_str(line);
    }
    out
}

fn is_encoder_pragma(line: &str) -> bool {
    let rest = line.trim();
    let rest = match rest.strip_prefix("pragma") {
        Some(r) => r,
        None => return false,
    };
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return false;
    }
    let rest = rest.trim_start();
    let rest = match rest.strip_prefix("experimental") {
        Some(r) => r,
        None => return false,
    };
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return false;
    }
    let rest = rest.trim_start();
    match rest.strip_prefix("ABIEncoderV2") {
        Some(r) => r.trim_start() == ";",
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod imports {
        use super::*;

        #[test]
        fn strips_single_line_import() {
            let src = "import \"./A.sol\";\ncontract B {}\n";
            assert_eq!(strip_imports(src), "\ncontract B {}\n");
        }

        #[test]
        fn strips_named_import() {
            let src = "import {A, B} from \"./AB.sol\";\ncontract C {}\n";
            assert_eq!(strip_imports(src), "\ncontract C {}\n");
        }

        #[test]
        fn strips_multi_line_import() {
            let src = "import {\n    A,\n    B\n} from \"./AB.sol\";\ncontract C {}\n";
            assert_eq!(strip_imports(src), "\ncontract C {}\n");
        }

        #[test]
        fn strips_indented_import() {
            let src = "    import \"./A.sol\";\ncontract B {}\n";
            assert_eq!(strip_imports(src), "\ncontract B {}\n");
        }

        #[test]
        fn keeps_line_terminator_and_following_blank_lines() {
            let src = "import \"./A.sol\";\n\n\ncontract B {}\n";
            assert_eq!(strip_imports(src), "\n\n\ncontract B {}\n");
        }

        #[test]
        fn keeps_surrounding_content() {
            let src = "pragma solidity ^0.8.13;\nimport \"./A.sol\";\ncontract B {}\n";
            assert_eq!(
                strip_imports(src),
                "pragma solidity ^0.8.13;\n\ncontract B {}\n"
            );
        }

        #[test]
        fn removes_trailing_spaces_after_semicolon() {
            let src = "import \"./A.sol\";   \ncontract B {}\n";
            assert_eq!(strip_imports(src), "\ncontract B {}\n");
        }

        #[test]
        fn ignores_identifiers_starting_with_import() {
            let src = "importQueue();\nimport_thing();\n";
            assert_eq!(strip_imports(src), src);
        }

        #[test]
        fn ignores_import_without_terminator() {
            // Not a well-formed directive; nothing may be consumed.
            let src = "import \"./A.sol\"\n";
            assert_eq!(strip_imports(src), src);
        }

        #[test]
        fn does_not_consume_past_terminator() {
            let src = "import \"./A.sol\"; contract B {}\n";
            assert_eq!(strip_imports(src), "contract B {}\n");
        }

        #[test]
        fn strips_every_import() {
            let src = "import \"./A.sol\";\nimport \"./B.sol\";\nimport \"./C.sol\";\nuint x;\n";
            assert_eq!(strip_imports(src), "\n\n\nuint x;\n");
        }

        #[test]
        fn mid_line_import_keyword_untouched() {
            let src = "string constant HELP = \"import this\";\n";
            assert_eq!(strip_imports(src), src);
        }

        #[test]
        fn extracts_plain_path() {
            assert_eq!(import_paths("import \"./A.sol\";\n"), vec!["./A.sol"]);
        }

        #[test]
        fn extracts_from_path() {
            assert_eq!(
                import_paths("import {X} from \"../lib/X.sol\";\n"),
                vec!["../lib/X.sol"]
            );
        }

        #[test]
        fn extracts_single_quoted_path() {
            assert_eq!(import_paths("import './A.sol';\n"), vec!["./A.sol"]);
        }

        #[test]
        fn extracts_aliased_glob_path() {
            assert_eq!(
                import_paths("import * as oz from \"@oz/contracts/C.sol\";\n"),
                vec!["@oz/contracts/C.sol"]
            );
        }

        #[test]
        fn extracts_in_source_order() {
            let src = "import \"./B.sol\";\ncontract X {}\nimport \"./A.sol\";\n";
            assert_eq!(import_paths(src), vec!["./B.sol", "./A.sol"]);
        }

        #[test]
        fn extracts_from_multi_line_directive() {
            let src = "import {\n    A\n} from \"./A.sol\";\n";
            assert_eq!(import_paths(src), vec!["./A.sol"]);
        }
    }

    mod license {
        use super::*;

        #[test]
        fn rewrites_license_line() {
            let src = "// SPDX-License-Identifier: MIT\ncontract A {}\n";
            assert_eq!(
                rewrite_license_lines(src),
                "// License-Identifier: MIT\ncontract A {}\n"
            );
        }

        #[test]
        fn rewrites_without_space_after_comment() {
            let src = "//SPDX-License-Identifier: GPL-3.0\n";
            assert_eq!(rewrite_license_lines(src), "//License-Identifier: GPL-3.0\n");
        }

        #[test]
        fn rewrites_every_occurrence() {
            let src = "// SPDX-License-Identifier: MIT\nuint x;\n// SPDX-License-Identifier: GPL-3.0\n";
            let out = rewrite_license_lines(src);
            assert!(!out.contains("SPDX-License-Identifier:"));
            assert_eq!(out.matches("License-Identifier:").count(), 2);
        }

        #[test]
        fn ignores_non_comment_lines() {
            let src = "string constant S = \"SPDX-License-Identifier: MIT\";\n";
            assert_eq!(rewrite_license_lines(src), src);
        }

        #[test]
        fn license_text_preserved() {
            let src = "// SPDX-License-Identifier: BUSL-1.1\n";
            assert_eq!(
                rewrite_license_lines(src),
                "// License-Identifier: BUSL-1.1\n"
            );
        }
    }

    mod encoder_pragma {
        use super::*;

        #[test]
        fn keeps_single_occurrence() {
            let src = "pragma experimental ABIEncoderV2;\ncontract A {}\n";
            assert_eq!(dedup_encoder_pragma(src), src);
        }

        #[test]
        fn removes_later_occurrences() {
            let src = "pragma experimental ABIEncoderV2;\nuint x;\npragma experimental ABIEncoderV2;\nuint y;\n";
            assert_eq!(
                dedup_encoder_pragma(src),
                "pragma experimental ABIEncoderV2;\nuint x;\nuint y;\n"
            );
        }

        #[test]
        fn first_occurrence_preserved_verbatim() {
            let src = "pragma  experimental  ABIEncoderV2 ;\npragma experimental ABIEncoderV2;\n";
            assert_eq!(
                dedup_encoder_pragma(src),
                "pragma  experimental  ABIEncoderV2 ;\n"
            );
        }

        #[test]
        fn other_pragmas_untouched() {
            let src = "pragma solidity ^0.8.13;\npragma solidity ^0.8.13;\n";
            assert_eq!(dedup_encoder_pragma(src), src);
        }

        #[test]
        fn no_occurrence_is_noop() {
            let src = "contract A {}\n";
            assert_eq!(dedup_encoder_pragma(src), src);
        }
    }
}
