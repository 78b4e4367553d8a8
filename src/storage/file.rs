//! YAML file store
//!
//! Layout under the root directory:
//!
//! ```text
//! tickets/<ticket-id>.yaml              one TicketRecord per file
//! comments/<ticket-id>/<seq>.yaml       one CommentRecord per file
//! ```
//!
//! Every file is written to a fresh temporary file in the target directory
//! and renamed into place. Comment files are never overwritten: a writer
//! claims the next free sequence number with a no-clobber rename, so several
//! processes sharing a root can append to the same thread without losing
//! entries.

use super::record::{CommentRecord, TicketRecord, decode_comment, decode_ticket};
use super::repository::{TicketPatch, TicketStore};
use crate::core::{Comment, Ticket, TicketId};
use crate::error::{Result, SupportDeskError};
use crate::query::TicketFilter;
use async_trait::async_trait;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::sync::Mutex;

/// Width of the zero-padded sequence prefix of comment files
const SEQUENCE_WIDTH: usize = 10;

/// Store that keeps each ticket in its own YAML document
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
    // serializes ticket read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Open (and create if needed) a store rooted at `root`
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let storage = Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        };
        fs::create_dir_all(storage.tickets_dir()).await?;
        fs::create_dir_all(storage.comments_dir()).await?;
        tracing::debug!(root = %storage.root.display(), "Opened file storage");
        Ok(storage)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn tickets_dir(&self) -> PathBuf {
        self.root.join("tickets")
    }

    fn comments_dir(&self) -> PathBuf {
        self.root.join("comments")
    }

    fn ticket_path(&self, id: &TicketId) -> PathBuf {
        self.tickets_dir().join(format!("{id}.yaml"))
    }

    fn thread_dir(&self, id: &TicketId) -> PathBuf {
        self.comments_dir().join(id.to_string())
    }

    async fn read_ticket(&self, id: &TicketId) -> Result<Option<Ticket>> {
        match fs::read_to_string(self.ticket_path(id)).await {
            Ok(content) => {
                let record: TicketRecord = serde_yaml::from_str(&content)?;
                Ok(Some(decode_ticket(record)?))
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Comment files of a thread with their sequence numbers, in sequence order
    async fn thread_entries(dir: &Path) -> Result<Vec<(u64, PathBuf)>> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("yaml") {
                continue;
            }
            let sequence = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok());
            if let Some(sequence) = sequence {
                files.push((sequence, path));
            }
        }
        files.sort_by_key(|(sequence, _)| *sequence);
        Ok(files)
    }

    async fn write_ticket(&self, ticket: &Ticket, replace: bool) -> io::Result<()> {
        let content = serde_yaml::to_string(&TicketRecord::from(ticket)).map_err(io::Error::other)?;
        write_file(self.ticket_path(&ticket.id), content, replace).await
    }
}

/// Write `content` through a uniquely named temporary file next to `path`
///
/// With `replace` unset the final rename fails with `AlreadyExists` instead of
/// overwriting an existing file.
async fn write_file(path: PathBuf, content: String, replace: bool) -> io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let dir = path
            .parent()
            .ok_or_else(|| io::Error::new(ErrorKind::InvalidInput, "path has no parent"))?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        if replace {
            tmp.persist(&path)?;
        } else {
            tmp.persist_noclobber(&path)?;
        }
        Ok(())
    })
    .await
    .map_err(io::Error::other)?
}

#[async_trait]
impl TicketStore for FileStorage {
    async fn get_by_id(&self, id: &TicketId) -> Result<Option<Ticket>> {
        self.read_ticket(id).await
    }

    async fn insert(&self, ticket: &Ticket) -> Result<()> {
        match self.write_ticket(ticket, false).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(SupportDeskError::Storage(
                format!("Ticket {} already exists", ticket.id),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_fields(&self, id: &TicketId, patch: TicketPatch) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut ticket = self
            .read_ticket(id)
            .await?
            .ok_or_else(|| SupportDeskError::not_found(id))?;
        if patch.is_empty() {
            return Ok(());
        }
        patch.apply_to(&mut ticket);
        Ok(self.write_ticket(&ticket, true).await?)
    }

    async fn query_all(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let mut tickets = Vec::new();
        let mut entries = fs::read_dir(self.tickets_dir()).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            let record: TicketRecord = serde_yaml::from_str(&content)?;
            tickets.push(decode_ticket(record)?);
        }

        Ok(filter.apply(tickets))
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        if !fs::try_exists(self.ticket_path(&comment.ticket_id)).await? {
            return Err(SupportDeskError::not_found(comment.ticket_id));
        }

        let dir = self.thread_dir(&comment.ticket_id);
        fs::create_dir_all(&dir).await?;
        let content = serde_yaml::to_string(&CommentRecord::from(comment))?;

        let mut sequence = Self::thread_entries(&dir)
            .await?
            .last()
            .map_or(0, |(last, _)| last + 1);
        loop {
            let path = dir.join(format!("{sequence:0width$}.yaml", width = SEQUENCE_WIDTH));
            match write_file(path, content.clone(), false).await {
                Ok(()) => return Ok(()),
                // another writer claimed this slot
                Err(e) if e.kind() == ErrorKind::AlreadyExists => sequence += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn comments_by_ticket(&self, id: &TicketId) -> Result<Vec<Comment>> {
        let mut comments = Vec::new();
        for (_, path) in Self::thread_entries(&self.thread_dir(id)).await? {
            let content = fs::read_to_string(&path).await?;
            let record: CommentRecord = serde_yaml::from_str(&content)?;
            comments.push(decode_comment(record)?);
        }
        comments.sort_by_key(|comment| comment.created_at);
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommentBuilder, Status};
    use crate::error::DecodeError;
    use crate::test_utils::{at_hour, sample_tickets};
    use tempfile::TempDir;

    async fn create_test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path()).await.unwrap();
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn test_save_and_load_ticket() {
        let (storage, _temp) = create_test_storage().await;
        let ticket = sample_tickets().remove(1);

        storage.insert(&ticket).await.unwrap();
        let loaded = storage.get_by_id(&ticket.id).await.unwrap();

        assert_eq!(loaded, Some(ticket));
    }

    #[tokio::test]
    async fn test_missing_ticket_is_none() {
        let (storage, _temp) = create_test_storage().await;
        assert_eq!(storage.get_by_id(&TicketId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_fields_persists() {
        let (storage, _temp) = create_test_storage().await;
        let ticket = sample_tickets().remove(0);
        storage.insert(&ticket).await.unwrap();

        storage
            .update_fields(
                &ticket.id,
                TicketPatch {
                    status: Some(Status::Resolved),
                    updated_at: Some(at_hour(9)),
                    resolved_at: Some(at_hour(9)),
                },
            )
            .await
            .unwrap();

        let loaded = storage.get_by_id(&ticket.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, Status::Resolved);
        assert_eq!(loaded.resolved_at, Some(at_hour(9)));
        assert_eq!(loaded.title, ticket.title);
    }

    #[tokio::test]
    async fn test_query_all_filters_and_sorts() {
        let (storage, _temp) = create_test_storage().await;
        for ticket in sample_tickets() {
            storage.insert(&ticket).await.unwrap();
        }

        let technical = storage
            .query_all(&TicketFilter::new().with_category(crate::core::Category::Technical))
            .await
            .unwrap();
        let titles: Vec<&str> = technical.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Slow dashboard", "Site down", "Cannot log in"]);
    }

    #[tokio::test]
    async fn test_comments_append_in_order() {
        let (storage, _temp) = create_test_storage().await;
        let ticket = sample_tickets().remove(0);
        storage.insert(&ticket).await.unwrap();

        for text in ["one", "two", "three"] {
            let comment = CommentBuilder::new()
                .ticket_id(ticket.id)
                .content(text)
                .created_at(at_hour(1))
                .build();
            storage.insert_comment(&comment).await.unwrap();
        }

        let thread = storage.comments_by_ticket(&ticket.id).await.unwrap();
        let texts: Vec<&str> = thread.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_corrupt_record_fails_to_decode() {
        let (storage, _temp) = create_test_storage().await;
        let ticket = sample_tickets().remove(0);
        storage.insert(&ticket).await.unwrap();

        let path = storage.ticket_path(&ticket.id);
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, content.replace("status: Open", "status: Pending")).unwrap();

        let err = storage.get_by_id(&ticket.id).await.unwrap_err();
        assert!(matches!(
            err,
            SupportDeskError::Decode(DecodeError::InvalidEnum { field: "status", .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let (storage, _temp) = create_test_storage().await;
        let ticket = sample_tickets().remove(0);
        storage.insert(&ticket).await.unwrap();

        let err = storage.insert(&ticket).await.unwrap_err();
        assert!(matches!(err, SupportDeskError::Storage(_)));
    }

    #[tokio::test]
    async fn test_comments_are_one_file_each() {
        let (storage, _temp) = create_test_storage().await;
        let ticket = sample_tickets().remove(0);
        storage.insert(&ticket).await.unwrap();

        for text in ["first", "second"] {
            let comment = CommentBuilder::new().ticket_id(ticket.id).content(text).build();
            storage.insert_comment(&comment).await.unwrap();
        }

        let files: Vec<String> = std::fs::read_dir(storage.thread_dir(&ticket.id))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        assert_eq!(files, ["0000000000.yaml", "0000000001.yaml"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_on_shared_root_keep_every_comment() {
        use crate::core::FixedClock;
        use crate::lifecycle::TicketService;
        use std::sync::Arc;

        let temp = TempDir::new().unwrap();
        let clock = Arc::new(FixedClock::new(at_hour(0)));
        let first = TicketService::new(Arc::new(FileStorage::open(temp.path()).await.unwrap()))
            .with_clock(clock.clone());
        let second = TicketService::new(Arc::new(FileStorage::open(temp.path()).await.unwrap()))
            .with_clock(clock);

        let ticket = first
            .create_ticket(&crate::test_utils::valid_input())
            .await
            .unwrap();

        let rounds = 25;
        for _ in 0..rounds {
            let (a, b) = tokio::join!(
                first.update_status(&ticket.id, Status::InProgress, "agent1"),
                second.update_status(&ticket.id, Status::Closed, "agent2"),
            );
            a.unwrap();
            b.unwrap();
        }

        let thread = second.get_ticket_detail(&ticket.id).await.unwrap().comments;
        assert_eq!(thread.len(), rounds * 2);
        assert!(thread.iter().all(|c| c.is_system));
    }
}
