use rusqlite::{Connection, OpenFlags, Result as SqlResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::data::Material;

/// The Library reads materials from a local SQLite catalog file.
/// It holds the same columns as the hosted `materials` table.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open an existing catalog file without write access.
    /// Fails if the file does not exist; nothing is created.
    pub fn open_read_only(db_path: &Path) -> SqlResult<Self> {
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        debug!(path = %db_path.display(), "opened local catalog");

        Ok(Library {
            conn,
            db_path: db_path.to_path_buf(),
        })
    }

    /// Default location of the local catalog:
    /// - Linux: ~/.local/share/bells-note/materials.db
    /// - macOS: ~/Library/Application Support/bells-note/materials.db
    /// - Windows: %APPDATA%\bells-note\materials.db
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("bells-note");
        path.push("materials.db");
        Some(path)
    }

    /// Get every material, ordered by title (case-insensitive)
    pub fn get_all_materials(&self) -> SqlResult<Vec<Material>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, code, level, semester, college, department, type, topic, download_link
             FROM materials
             ORDER BY title COLLATE NOCASE ASC, id ASC",
        )?;

        let materials = stmt
            .query_map([], row_to_material)?
            .collect::<SqlResult<Vec<_>>>()?;

        info!(count = materials.len(), path = %self.db_path.display(), "read local catalog");

        Ok(materials)
    }
}

/// Writer side of the catalog, used to seed fixture files in tests
#[cfg(test)]
impl Library {
    /// Open (or create) a catalog file and make sure the schema exists.
    pub fn create(db_path: &Path) -> SqlResult<Self> {
        let library = Library {
            conn: Connection::open(db_path)?,
            db_path: db_path.to_path_buf(),
        };
        library.init_schema()?;
        Ok(library)
    }

    fn init_schema(&self) -> SqlResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS materials (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT,
                code            TEXT,
                level           TEXT,
                semester        TEXT,
                college         TEXT,
                department      TEXT,
                type            TEXT,
                topic           TEXT,
                download_link   TEXT,
                created_at      INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_materials_title
             ON materials(title COLLATE NOCASE)",
            [],
        )?;

        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    pub fn material_count(&self) -> SqlResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM materials", [], |row| row.get(0))
    }

    /// Add a material to the catalog, returning its row ID
    pub fn insert_material(&self, material: &Material) -> SqlResult<i64> {
        self.conn.execute(
            "INSERT INTO materials
                (title, code, level, semester, college, department, type, topic, download_link, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                material.title,
                material.code,
                material.level,
                material.semester,
                material.college,
                material.department,
                material.kind,
                material.topic,
                material.download_link,
                chrono::Utc::now().timestamp(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch a single material by row ID
    pub fn get_material(&self, id: i64) -> SqlResult<Option<Material>> {
        use rusqlite::OptionalExtension;

        self.conn
            .query_row(
                "SELECT title, code, level, semester, college, department, type, topic, download_link
                 FROM materials WHERE id = ?1",
                [id],
                row_to_material,
            )
            .optional()
    }
}

fn row_to_material(row: &rusqlite::Row<'_>) -> SqlResult<Material> {
    Ok(Material {
        title: row.get(0)?,
        code: row.get(1)?,
        level: row.get(2)?,
        semester: row.get(3)?,
        college: row.get(4)?,
        department: row.get(5)?,
        kind: row.get(6)?,
        topic: row.get(7)?,
        download_link: row.get(8)?,
    })
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(title: &str, code: &str) -> Material {
        Material {
            title: Some(title.to_string()),
            code: Some(code.to_string()),
            level: Some("100".to_string()),
            kind: Some("Note".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_sets_up_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.db");

        let library = Library::create(&path).unwrap();

        assert_eq!(library.material_count().unwrap(), 0);
        assert_eq!(library.path(), &path);
        assert!(library.get_all_materials().unwrap().is_empty());
    }

    #[test]
    fn test_materials_come_back_ordered_by_title() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::create(&dir.path().join("materials.db")).unwrap();

        library.insert_material(&material("biology II", "BIO202")).unwrap();
        library.insert_material(&material("Algebra I", "MAT101")).unwrap();
        library.insert_material(&material("Chemistry", "CHM101")).unwrap();

        let codes: Vec<_> = library
            .get_all_materials()
            .unwrap()
            .into_iter()
            .map(|m| m.code.unwrap())
            .collect();
        assert_eq!(codes, ["MAT101", "BIO202", "CHM101"]);
        assert_eq!(library.material_count().unwrap(), 3);
    }

    #[test]
    fn test_null_columns_read_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::create(&dir.path().join("materials.db")).unwrap();

        let id = library.insert_material(&material("X", "X100")).unwrap();
        let stored = library.get_material(id).unwrap().unwrap();

        assert_eq!(stored.topic, None);
        assert_eq!(stored.department, None);
        assert_eq!(stored, material("X", "X100"));
        assert_eq!(library.get_material(id + 1).unwrap(), None);
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.db");

        Library::create(&path).unwrap().insert_material(&material("Algebra I", "MAT101")).unwrap();

        let reader = Library::open_read_only(&path).unwrap();
        assert_eq!(reader.get_all_materials().unwrap().len(), 1);
    }

    #[test]
    fn test_read_only_open_does_not_create_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.db");

        assert!(Library::open_read_only(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_read_only_open_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.db");
        Library::create(&path).unwrap();

        let reader = Library::open_read_only(&path).unwrap();

        assert!(reader.insert_material(&material("X", "X100")).is_err());
    }
}
