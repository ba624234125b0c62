//! Visited set for cycle detection
//!
//! Entries are identified by (device, inode), so the same object reached
//! through a symlink, a hard link, a bind mount or a second root maps to the
//! same key. The set only grows; it lives as long as the [`Walker`] that owns it.
//!
//! [`Walker`]: super::Walker

use std::collections::HashSet;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;

/// Filesystem identity of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    pub dev: u64,
    pub ino: u64,
}

impl FileId {
    pub fn new(dev: u64, ino: u64) -> Self {
        Self { dev, ino }
    }

    pub fn from_metadata(meta: &Metadata) -> Self {
        Self::new(meta.dev(), meta.ino())
    }
}

#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<FileId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `(dev, ino)`, returning true if it was already present
    pub fn test_and_insert(&mut self, dev: u64, ino: u64) -> bool {
        self.test_and_insert_id(FileId::new(dev, ino))
    }

    /// Insert `id`, returning true if it was already present
    pub fn test_and_insert_id(&mut self, id: FileId) -> bool {
        !self.seen.insert(id)
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_first_insert_is_new() {
        let mut set = VisitedSet::new();
        assert!(set.is_empty());
        assert!(!set.test_and_insert(1, 42));
        assert!(set.test_and_insert(1, 42));
        assert!(set.test_and_insert(1, 42));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_identity_uses_both_fields() {
        let mut set = VisitedSet::new();
        assert!(!set.test_and_insert(1, 42));
        assert!(!set.test_and_insert(2, 42));
        assert!(!set.test_and_insert(1, 43));
        assert_eq!(set.len(), 3);
        assert!(set.contains(&FileId::new(2, 42)));
        assert!(!set.contains(&FileId::new(2, 43)));
    }

    #[test]
    fn test_pair_and_id_forms_share_one_set() {
        let mut set = VisitedSet::new();
        assert!(!set.test_and_insert(7, 9));
        assert!(set.test_and_insert_id(FileId::new(7, 9)));

        assert!(!set.test_and_insert_id(FileId::new(7, 10)));
        assert!(set.test_and_insert(7, 10));
        assert_eq!(set.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_resolves_to_same_identity() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join("link");
        fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let mut set = VisitedSet::new();
        let direct = FileId::from_metadata(&fs::metadata(&target).unwrap());
        let through_link = FileId::from_metadata(&fs::metadata(&link).unwrap());

        assert!(!set.test_and_insert_id(direct));
        assert!(set.test_and_insert_id(through_link));
    }
}
