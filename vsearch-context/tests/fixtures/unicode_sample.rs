// @generated by vsearch-bundle. DO NOT EDIT.
pub const UNICODE_SAMPLE: &str = "naïve café\u{7}\tbell\u{1b}[0m\0 日本語 \"quoted\" back\\slash\u{7f}\r\nend";
