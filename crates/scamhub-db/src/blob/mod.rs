//! Blob stores for uploaded files

mod fs;
mod memory;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;

use uuid::Uuid;

/// Fresh locator for a blob, keeping a short alphanumeric extension from
/// `suggested_name` when there is one.
fn new_locator(suggested_name: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    match extension(suggested_name) {
        Some(ext) => format!("{id}.{ext}"),
        None => id,
    }
}

fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    let valid = !stem.is_empty()
        && (1..=10).contains(&ext.len())
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_keeps_extension() {
        let locator = new_locator("Screenshot 2024.PNG");
        assert!(locator.ends_with(".png"));
        assert_eq!(locator.len(), 32 + 4);
    }

    #[test]
    fn test_locator_drops_suspicious_extension() {
        assert!(!new_locator("../../etc/passwd").contains('.'));
        assert!(!new_locator(".bashrc").contains('.'));
        assert!(!new_locator("archive.tar/gz").contains('.'));
        assert!(!new_locator("noext").contains('.'));
    }
}
