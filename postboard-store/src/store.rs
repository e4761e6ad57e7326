//! CollectionActor — one tokio actor per JSON collection file
//!
//! Every operation on a collection (`load`, `save`, and the combined
//! `modify`) is queued on an mpsc channel and processed one at a time, so a
//! load → mutate → save cycle can never interleave with another one on the
//! same file. Two concurrent appends therefore both survive.
//!
//! Saves are atomic from the caller's view: the new content is written to a
//! sibling `*.json.tmp` file, synced, then renamed over the collection.
//!
//! # Example
//!
//! ```rust,no_run
//! use postboard_store::store::{CollectionActor, Record};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct Note { id: String, body: String }
//!
//! impl Record for Note {
//!     fn id(&self) -> &str { &self.id }
//! }
//!
//! #[tokio::main]
//! async fn main() -> postboard_store::Result<()> {
//!     let notes = CollectionActor::<Note>::spawn("notes", "/tmp/notes.json".into(), 64).await?;
//!
//!     let count = notes
//!         .modify(|all| {
//!             all.push(Note { id: "n1".into(), body: "hello".into() });
//!             Ok(all.len())
//!         })
//!         .await?;
//!     assert_eq!(count, notes.load().await?.len());
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};

/// A record that can live in a collection file
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Unique identifier within the collection
    fn id(&self) -> &str;
}

// ─── Actor Messages ───

/// What the actor does after running a modify job
enum Commit {
    /// Persist the mutated collection, then hand the save outcome back
    Persist(Box<dyn FnOnce(Result<()>) + Send>),
    /// Leave the file untouched; the caller has already been answered
    Discard,
}

type ModifyJob<T> = Box<dyn FnOnce(Result<&mut Vec<T>>) -> Commit + Send>;

enum CollectionMsg<T> {
    Load {
        reply: oneshot::Sender<Result<Vec<T>>>,
    },
    Save {
        records: Vec<T>,
        reply: oneshot::Sender<Result<()>>,
    },
    Modify {
        job: ModifyJob<T>,
    },
}

// ─── Actor ───

/// Owns one collection file and processes its operations sequentially
pub struct CollectionActor<T: Record> {
    name: Arc<str>,
    path: PathBuf,
    rx: mpsc::Receiver<CollectionMsg<T>>,
}

impl<T: Record> CollectionActor<T> {
    /// Spawn the actor and return a handle for sending messages
    ///
    /// Creates the parent directory and an empty `[]` collection if the file
    /// does not exist yet. An existing file is left as is, even if corrupt;
    /// corruption surfaces on the first read.
    pub async fn spawn(
        name: &str,
        path: PathBuf,
        queue_depth: usize,
    ) -> Result<CollectionHandle<T>> {
        ensure_collection_file(&path).await?;

        let name: Arc<str> = Arc::from(name);
        let (tx, rx) = mpsc::channel(queue_depth.max(1));
        let actor = Self {
            name: Arc::clone(&name),
            path,
            rx,
        };

        info!(collection = %name, path = %actor.path.display(), "CollectionActor spawned");
        tokio::spawn(actor.run());
        Ok(CollectionHandle { name, tx })
    }

    /// Main event loop
    async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                CollectionMsg::Load { reply } => {
                    let _ = reply.send(self.read_all().await);
                }
                CollectionMsg::Save { records, reply } => {
                    let _ = reply.send(self.write_all(&records).await);
                }
                CollectionMsg::Modify { job } => self.handle_modify(job).await,
            }
        }
        debug!(collection = %self.name, "CollectionActor stopped");
    }

    // ─── Handler Implementations ───

    async fn handle_modify(&self, job: ModifyJob<T>) {
        match self.read_all().await {
            Ok(mut records) => {
                if let Commit::Persist(finish) = job(Ok(&mut records)) {
                    finish(self.write_all(&records).await);
                }
            }
            Err(err) => {
                let _ = job(Err(err));
            }
        }
    }

    async fn read_all(&self) -> Result<Vec<T>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(collection = %self.name, "Collection file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&raw).map_err(|e| StoreError::CorruptData {
            collection: self.name.to_string(),
            detail: e.to_string(),
        })
    }

    async fn write_all(&self, records: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        write_atomic(&self.path, &bytes).await?;
        debug!(collection = %self.name, records = records.len(), "Collection saved");
        Ok(())
    }
}

// ─── Handle (client-facing API) ───

/// Cloneable handle to a collection actor
pub struct CollectionHandle<T: Record> {
    name: Arc<str>,
    tx: mpsc::Sender<CollectionMsg<T>>,
}

impl<T: Record> Clone for CollectionHandle<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            tx: self.tx.clone(),
        }
    }
}

impl<T: Record> CollectionHandle<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the whole collection as currently persisted
    pub async fn load(&self) -> Result<Vec<T>> {
        let (reply, rx) = oneshot::channel();
        self.send(CollectionMsg::Load { reply }).await?;
        rx.await.map_err(|_| self.dropped())?
    }

    /// Replace the whole collection
    pub async fn save(&self, records: Vec<T>) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(CollectionMsg::Save { records, reply }).await?;
        rx.await.map_err(|_| self.dropped())?
    }

    /// Serialized read-modify-write
    ///
    /// The actor loads the collection, runs `f` on it, and saves it only if
    /// `f` returned `Ok`. The value is handed back once the save succeeded.
    /// If the caller stops waiting, the job still runs to completion.
    ///
    /// `f` runs on the actor task and must not panic: a panic stops the actor
    /// and every later call on this collection fails with `ActorUnavailable`.
    pub async fn modify<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Vec<T>) -> Result<R> + Send + 'static,
    {
        let (reply, rx) = oneshot::channel::<Result<R>>();
        let job: ModifyJob<T> = Box::new(move |loaded: Result<&mut Vec<T>>| match loaded.and_then(f) {
            Ok(value) => Commit::Persist(Box::new(move |saved: Result<()>| {
                let _ = reply.send(saved.map(|()| value));
            })),
            Err(err) => {
                let _ = reply.send(Err(err));
                Commit::Discard
            }
        });

        self.send(CollectionMsg::Modify { job }).await?;
        rx.await.map_err(|_| self.dropped())?
    }

    /// Find a record by id
    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(self.load().await?.into_iter().find(|r| r.id() == id))
    }

    /// First record matching `predicate`
    pub async fn find<P>(&self, predicate: P) -> Result<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.load().await?.into_iter().find(|r| predicate(r)))
    }

    /// All records matching `predicate`, in stored order
    pub async fn filter<P>(&self, predicate: P) -> Result<Vec<T>>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|r| predicate(r))
            .collect())
    }

    async fn send(&self, msg: CollectionMsg<T>) -> Result<()> {
        self.tx
            .send(msg)
            .await
            .map_err(|_| StoreError::ActorUnavailable(format!("collection {}", self.name)))
    }

    fn dropped(&self) -> StoreError {
        StoreError::ActorUnavailable(format!("collection {} dropped", self.name))
    }
}

// ─── File Helpers ───

/// Create `path` holding an empty JSON array if it does not exist
pub async fn ensure_collection_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    if !tokio::fs::try_exists(path).await? {
        write_atomic(path, b"[]").await?;
        info!(path = %path.display(), "Initialized empty collection");
    }
    Ok(())
}

/// Write `bytes` to a temporary sibling, sync it, then rename over `path`
///
/// On failure the temporary file is removed and `path` keeps its old content.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);

    let written = async {
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, path).await
    }
    .await;

    if let Err(e) = written {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
            debug!(error = %cleanup, "Temporary file cleanup failed");
        }
        return Err(e.into());
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
