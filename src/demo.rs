use include_dir::{include_dir, Dir};

static RESOURCES: Dir = include_dir!("src/resources");

const DEMO_PAYLOAD_FILE: &str = "demo_payload.json";
const SAMPLE_EXPORT_FILE: &str = "sample_export.csv";

/// Raw JSON of the bundled demo statistics payload.
pub fn payload_bytes() -> &'static [u8] {
    RESOURCES
        .get_file(DEMO_PAYLOAD_FILE)
        .map(|f| f.contents())
        .unwrap_or_default()
}

/// A tiny Monkeytype export with the columns the backend requires.
pub fn sample_export() -> &'static str {
    RESOURCES
        .get_file(SAMPLE_EXPORT_FILE)
        .and_then(|f| f.contents_utf8())
        .unwrap_or_default()
}
