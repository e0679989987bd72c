//! Payload ingestion: file or stdin reads, encoding resolution, and
//! decoding. The whole payload is materialized before parsing starts; the
//! engine has no streaming mode.

use std::{
    fs,
    io::Read,
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Reads the entire payload from `path`, or from stdin when the path is `-`.
pub fn read_payload(path: &Path) -> Result<Vec<u8>> {
    if is_dash(path) {
        let mut buffer = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("Reading payload from stdin")?;
        Ok(buffer)
    } else {
        fs::read(path).with_context(|| format!("Reading input file {path:?}"))
    }
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

/// Filename hint for format detection and reporting: an explicit override
/// wins, otherwise the input's file name; stdin has no hint.
pub fn source_hint(path: &Path, override_name: Option<&str>) -> Option<String> {
    if let Some(name) = override_name {
        return Some(name.to_string());
    }
    if is_dash(path) {
        return None;
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn encoding_defaults_to_utf8() {
        assert_eq!(resolve_encoding(None).unwrap(), UTF_8);
        assert_eq!(
            resolve_encoding(Some("windows-1252")).unwrap().name(),
            "windows-1252"
        );
        assert!(resolve_encoding(Some("not-a-charset")).is_err());
    }

    #[test]
    fn source_hint_prefers_override_and_skips_stdin() {
        let path = PathBuf::from("data/metrics.csv");
        assert_eq!(source_hint(&path, None).as_deref(), Some("metrics.csv"));
        assert_eq!(
            source_hint(&path, Some("renamed.json")).as_deref(),
            Some("renamed.json")
        );
        assert_eq!(source_hint(Path::new("-"), None), None);
    }

    #[test]
    fn decode_rejects_invalid_sequences() {
        assert_eq!(decode_bytes(b"plain", UTF_8).unwrap(), "plain");
        assert!(decode_bytes(&[0xff, 0xfe, 0x00], UTF_8).is_err());
    }
}
