//! Output artifact helpers.
//!
//! Filename derivation and the final write. Nothing here runs unless a
//! pipeline completed; a failed run produces no artifact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Derive the artifact filename for a topic: `blog_post_<slug>.txt`, where
/// the slug is the lowercased topic with spaces replaced by underscores.
pub fn derive_filename(topic: &str) -> String {
    let slug = topic.to_lowercase().replace(' ', "_");
    format!("blog_post_{slug}.txt")
}

/// Write the final pipeline text into `dir` under the derived filename and
/// return the path written.
pub fn write_artifact(dir: &Path, topic: &str, text: &str) -> io::Result<PathBuf> {
    let path = dir.join(derive_filename(topic));
    fs::write(&path, text)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_is_lowercased_and_underscored() {
        assert_eq!(
            derive_filename("The Future of Artificial Intelligence in Healthcare"),
            "blog_post_the_future_of_artificial_intelligence_in_healthcare.txt"
        );
    }

    #[test]
    fn test_filename_for_single_word_topic() {
        assert_eq!(derive_filename("Rust"), "blog_post_rust.txt");
    }

    #[test]
    fn test_write_artifact_roundtrip() {
        let dir = tempfile::tempdir().expect("temp dir");

        let path = write_artifact(dir.path(), "Test Topic", "final text").expect("write");

        assert_eq!(path.file_name().unwrap(), "blog_post_test_topic.txt");
        let written = fs::read_to_string(&path).expect("read back");
        assert_eq!(written, "final text");
    }
}
