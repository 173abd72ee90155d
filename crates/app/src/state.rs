//! Application state management

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use hostel_core::{
    AllocationEngine, Database, Error, OccupancySummary, Result, Role, Session,
};
use uuid::Uuid;

/// Main application state
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    /// The active login session, mirrored from the session store
    session: Arc<Mutex<Option<Session>>>,
}

impl AppState {
    /// Open the store under the platform data directory
    pub fn new() -> Result<Self> {
        let db_path = Self::data_path()?.join("hostel.db");

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::open(db_path)
    }

    /// Open the store at an explicit path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_db(Database::open(path)?)
    }

    /// In-memory state (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_db(Database::open_in_memory()?)
    }

    fn from_db(db: Database) -> Result<Self> {
        AllocationEngine::new(&db).seed_rooms()?;

        // Resume a persisted session; a corrupt flag loads as None
        let session = db.session().load()?;
        if let Some(session) = &session {
            tracing::info!(role = %session.role, "Resumed session");
        }

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            session: Arc::new(Mutex::new(session)),
        })
    }

    fn data_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("edu", "du", "hostel").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap() = session;
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    pub fn current_role(&self) -> Option<Role> {
        self.session.lock().unwrap().as_ref().map(|s| s.role)
    }

    /// The logged-in student's identity, if a student session is active
    pub fn current_student_id(&self) -> Option<Uuid> {
        self.session
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|s| s.student_id)
    }

    /// Current bed usage across the registry
    pub fn occupancy(&self) -> Result<OccupancySummary> {
        let db = self.db.lock().unwrap();
        AllocationEngine::new(&db).occupancy()
    }
}
