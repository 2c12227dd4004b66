use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::models::{default_trainers, AppState};

/// JSON-файл с состоянием приложения.
#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
    // Сериализует записи файла: два сохранения не пишут одновременно.
    write_lock: Arc<Mutex<()>>,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Читает состояние. Если файла нет, создаёт состояние по умолчанию и сразу его сохраняет.
    pub async fn load(&self) -> Result<AppState, StorageError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("State file {} not found, seeding defaults", self.path.display());
                let state = AppState::seeded();
                self.save(&state).await?;
                return Ok(state);
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut state: AppState =
            serde_json::from_slice(&raw).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        if state.trainers.is_empty() {
            log::warn!(
                "Trainer catalogue in {} is empty, restoring defaults",
                self.path.display()
            );
            state.trainers = default_trainers();
        }

        log::info!(
            "State loaded: {} users, {} trainers, {} bookings",
            state.users.len(),
            state.trainers.len(),
            state.bookings.len()
        );
        Ok(state)
    }

    /// Пишет состояние во временный файл рядом и атомарно подменяет им основной.
    pub async fn save(&self, state: &AppState) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.write_atomic(state).await
    }

    /// Сохраняет снимок, снятый уже после захвата блокировки записи.
    /// Так более поздний снимок никогда не будет перезаписан более ранним.
    pub async fn save_from<F>(&self, snapshot: F) -> Result<(), StorageError>
    where
        F: Future<Output = AppState>,
    {
        let _guard = self.write_lock.lock().await;
        let state = snapshot.await;
        self.write_atomic(&state).await
    }

    async fn write_atomic(&self, state: &AppState) -> Result<(), StorageError> {
        let start_time = Instant::now();
        let bytes = serde_json::to_vec_pretty(state)?;

        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let tmp_path = self.tmp_path();
        let mut file = fs::File::create(&tmp_path).await.map_err(io_err)?;
        file.write_all(&bytes).await.map_err(io_err)?;
        file.sync_all().await.map_err(io_err)?;
        drop(file);

        fs::rename(&tmp_path, &self.path).await.map_err(io_err)?;

        log::debug!("💾 State saved to {} in {:?}", self.path.display(), start_time.elapsed());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
