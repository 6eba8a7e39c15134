use catalog_core::domain::{
    Article, ArticleDraft, ArticleId, Note, NoteDraft, NoteId, PhotoId, Recipe, RecipeDraft,
    RecipeId,
};
use catalog_core::error::{CatalogError, Result};
use catalog_core::ports::CatalogRepository;
use catalog_core::utils::now_timestamp;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use tracing::{debug, info, warn};

mod schema;

use schema::{
    CREATE_TABLES, SELECT_ARTICLES, SELECT_NOTES, SELECT_NOTE_PHOTOS, SELECT_RECIPES,
};

/// Author recorded for recipes created from the app
pub const USER_AUTHOR: &str = "user";

/// SQLite implementation of the CatalogRepository trait
pub struct SqliteCatalogRepository {
    conn: Connection,
}

/// Maps a rusqlite failure onto the catalog's storage errors
fn storage_error(error: rusqlite::Error) -> CatalogError {
    match &error {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::DatabaseCorrupt | ErrorCode::NotADatabase => {
                CatalogError::StoreCorrupt(error.to_string())
            }
            ErrorCode::CannotOpen
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::PermissionDenied
            | ErrorCode::ReadOnly
            | ErrorCode::SystemIoFailure
            | ErrorCode::DiskFull
            | ErrorCode::OutOfMemory
            | ErrorCode::FileLockingProtocolFailed => {
                CatalogError::StorageUnavailable(error.to_string())
            }
            // Missing tables, constraint failures and the like mean the file is not a catalog
            _ => CatalogError::StoreCorrupt(error.to_string()),
        },
        rusqlite::Error::InvalidPath(_) => CatalogError::StorageUnavailable(error.to_string()),
        _ => CatalogError::StoreCorrupt(error.to_string()),
    }
}

fn recipe_from_row(row: &Row) -> rusqlite::Result<Recipe> {
    Ok(Recipe {
        id: row.get(0)?,
        title: row.get(1)?,
        utensils: row.get(2)?,
        ingredients: row.get(3)?,
        steps: row.get(4)?,
        last_modified: row.get(5)?,
        author: row.get(6)?,
        photo_path: row.get(7)?,
        notes: Vec::new(),
    })
}

fn article_from_row(row: &Row) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author: row.get(3)?,
        publish_date: row.get(4)?,
        photo_path: row.get(5)?,
    })
}

fn note_from_row(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        recipe_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        publish_date: row.get(4)?,
        image_paths: Vec::new(),
    })
}

impl SqliteCatalogRepository {
    /// Opens (or creates) the catalog database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening catalog database");
        let conn = Connection::open(path).map_err(storage_error)?;
        Self::from_connection(conn)
    }

    /// Opens a private in-memory catalog
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(storage_error)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(storage_error)?;
        Ok(Self { conn })
    }

    fn exists(&self, table: &str, id_column: &str, id: i64) -> Result<bool> {
        let query = format!("SELECT 1 FROM {} WHERE {} = ?1", table, id_column);
        let found = self
            .conn
            .query_row(&query, params![id], |_| Ok(()))
            .optional()
            .map_err(storage_error)?;
        Ok(found.is_some())
    }

    fn ensure_exists(&self, entity: &'static str, table: &str, id_column: &str, id: i64) -> Result<()> {
        if self.exists(table, id_column, id)? {
            Ok(())
        } else {
            warn!(entity, id, "record not found");
            Err(CatalogError::not_found(entity, id))
        }
    }

    /// Fails with NotFound when a write touched no row
    fn expect_changed(changed: usize, entity: &'static str, id: i64) -> Result<()> {
        if changed == 0 {
            warn!(entity, id, "record not found");
            return Err(CatalogError::not_found(entity, id));
        }
        Ok(())
    }

    fn note_photos(&self, note_id: NoteId) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(SELECT_NOTE_PHOTOS).map_err(storage_error)?;
        let paths = stmt
            .query_map(params![note_id], |row| row.get::<_, String>(0))
            .map_err(storage_error)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()
            .map_err(storage_error)?;
        Ok(paths)
    }

    fn with_photos(&self, mut note: Note) -> Result<Note> {
        note.image_paths = self.note_photos(note.id)?;
        Ok(note)
    }

    fn with_notes(&self, mut recipe: Recipe) -> Result<Recipe> {
        recipe.notes = self.notes_for_recipe(recipe.id)?;
        Ok(recipe)
    }

    fn attach_photo(&self, link_table: &str, owner_column: &str, owner_id: i64, path: &str) -> Result<PhotoId> {
        let photo_id = self.add_photo(path)?;
        let query = format!(
            "INSERT OR IGNORE INTO {} ({}, photo_id) VALUES (?1, ?2)",
            link_table, owner_column
        );
        self.conn
            .execute(&query, params![owner_id, photo_id])
            .map_err(storage_error)?;
        info!(link_table, owner_id, photo_id, "photo attached");
        Ok(photo_id)
    }
}

impl CatalogRepository for SqliteCatalogRepository {
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(CREATE_TABLES).map_err(storage_error)?;
        debug!("catalog schema ready");
        Ok(())
    }

    fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let query = format!("{} ORDER BY r.recipe_id ASC", SELECT_RECIPES);
        let mut stmt = self.conn.prepare(&query).map_err(storage_error)?;

        let recipes = stmt
            .query_map([], recipe_from_row)
            .map_err(storage_error)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()
            .map_err(storage_error)?;

        let recipes = recipes
            .into_iter()
            .map(|recipe| self.with_notes(recipe))
            .collect::<Result<Vec<_>>>()?;
        debug!(count = recipes.len(), "listed recipes");
        Ok(recipes)
    }

    fn find_recipe(&self, id: RecipeId) -> Result<Option<Recipe>> {
        let query = format!("{} WHERE r.recipe_id = ?1", SELECT_RECIPES);
        let recipe = self
            .conn
            .query_row(&query, params![id], recipe_from_row)
            .optional()
            .map_err(storage_error)?;
        recipe.map(|recipe| self.with_notes(recipe)).transpose()
    }

    fn create_recipe(&self, draft: &RecipeDraft, author: Option<&str>) -> Result<RecipeId> {
        self.conn
            .execute(
                "INSERT INTO recipes (title, utensils, ingredients, steps, last_modified, author)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    draft.title,
                    draft.utensils,
                    draft.ingredients,
                    draft.steps,
                    now_timestamp(),
                    author
                ],
            )
            .map_err(storage_error)?;
        let id = self.conn.last_insert_rowid();
        info!(id, title = %draft.title, "recipe created");
        Ok(id)
    }

    fn update_recipe(&self, id: RecipeId, draft: &RecipeDraft) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE recipes
                 SET title = ?1, utensils = ?2, ingredients = ?3, steps = ?4, last_modified = ?5
                 WHERE recipe_id = ?6",
                params![
                    draft.title,
                    draft.utensils,
                    draft.ingredients,
                    draft.steps,
                    now_timestamp(),
                    id
                ],
            )
            .map_err(storage_error)?;
        Self::expect_changed(changed, "recipe", id)?;
        info!(id, "recipe updated");
        Ok(())
    }

    fn delete_recipe(&self, id: RecipeId) -> Result<()> {
        // Notes and photo links go with it through ON DELETE CASCADE
        let changed = self
            .conn
            .execute("DELETE FROM recipes WHERE recipe_id = ?1", params![id])
            .map_err(storage_error)?;
        Self::expect_changed(changed, "recipe", id)?;
        info!(id, "recipe deleted");
        Ok(())
    }

    fn list_articles(&self) -> Result<Vec<Article>> {
        let query = format!("{} ORDER BY a.article_id ASC", SELECT_ARTICLES);
        let mut stmt = self.conn.prepare(&query).map_err(storage_error)?;

        let articles = stmt
            .query_map([], article_from_row)
            .map_err(storage_error)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()
            .map_err(storage_error)?;
        debug!(count = articles.len(), "listed articles");
        Ok(articles)
    }

    fn find_article(&self, id: ArticleId) -> Result<Option<Article>> {
        let query = format!("{} WHERE a.article_id = ?1", SELECT_ARTICLES);
        self.conn
            .query_row(&query, params![id], article_from_row)
            .optional()
            .map_err(storage_error)
    }

    fn create_article(&self, draft: &ArticleDraft) -> Result<ArticleId> {
        self.conn
            .execute(
                "INSERT INTO articles (title, content, publish_date) VALUES (?1, ?2, ?3)",
                params![draft.title, draft.content, now_timestamp()],
            )
            .map_err(storage_error)?;
        let id = self.conn.last_insert_rowid();
        info!(id, title = %draft.title, "article created");
        Ok(id)
    }

    fn update_article(&self, id: ArticleId, draft: &ArticleDraft) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE articles SET title = ?1, content = ?2, publish_date = ?3 WHERE article_id = ?4",
                params![draft.title, draft.content, now_timestamp(), id],
            )
            .map_err(storage_error)?;
        Self::expect_changed(changed, "article", id)?;
        info!(id, "article updated");
        Ok(())
    }

    fn delete_article(&self, id: ArticleId) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM articles WHERE article_id = ?1", params![id])
            .map_err(storage_error)?;
        Self::expect_changed(changed, "article", id)?;
        info!(id, "article deleted");
        Ok(())
    }

    fn add_note(&self, recipe_id: RecipeId, draft: &NoteDraft) -> Result<NoteId> {
        self.ensure_exists("recipe", "recipes", "recipe_id", recipe_id)?;
        self.conn
            .execute(
                "INSERT INTO notes (title, content, publish_date, recipe_id) VALUES (?1, ?2, ?3, ?4)",
                params![draft.title, draft.content, now_timestamp(), recipe_id],
            )
            .map_err(storage_error)?;
        let id = self.conn.last_insert_rowid();
        info!(id, recipe_id, "note added");
        Ok(id)
    }

    fn find_note(&self, id: NoteId) -> Result<Option<Note>> {
        let query = format!("{} WHERE note_id = ?1", SELECT_NOTES);
        let note = self
            .conn
            .query_row(&query, params![id], note_from_row)
            .optional()
            .map_err(storage_error)?;
        note.map(|note| self.with_photos(note)).transpose()
    }

    fn notes_for_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Note>> {
        let query = format!("{} WHERE recipe_id = ?1 ORDER BY note_id ASC", SELECT_NOTES);
        let mut stmt = self.conn.prepare_cached(&query).map_err(storage_error)?;
        let notes = stmt
            .query_map(params![recipe_id], note_from_row)
            .map_err(storage_error)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()
            .map_err(storage_error)?;

        notes.into_iter().map(|note| self.with_photos(note)).collect()
    }

    fn update_note(&self, id: NoteId, draft: &NoteDraft) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE notes SET title = ?1, content = ?2, publish_date = ?3 WHERE note_id = ?4",
                params![draft.title, draft.content, now_timestamp(), id],
            )
            .map_err(storage_error)?;
        Self::expect_changed(changed, "note", id)?;
        info!(id, "note updated");
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE note_id = ?1", params![id])
            .map_err(storage_error)?;
        Self::expect_changed(changed, "note", id)?;
        info!(id, "note deleted");
        Ok(())
    }

    fn add_photo(&self, path: &str) -> Result<PhotoId> {
        self.conn
            .execute("INSERT OR IGNORE INTO photos (path) VALUES (?1)", params![path])
            .map_err(storage_error)?;
        self.conn
            .query_row(
                "SELECT photo_id FROM photos WHERE path = ?1",
                params![path],
                |row| row.get(0),
            )
            .map_err(storage_error)
    }

    fn attach_recipe_photo(&self, recipe_id: RecipeId, path: &str) -> Result<PhotoId> {
        self.ensure_exists("recipe", "recipes", "recipe_id", recipe_id)?;
        self.attach_photo("recipe_photos", "recipe_id", recipe_id, path)
    }

    fn attach_article_photo(&self, article_id: ArticleId, path: &str) -> Result<PhotoId> {
        self.ensure_exists("article", "articles", "article_id", article_id)?;
        self.attach_photo("article_photos", "article_id", article_id, path)
    }

    fn attach_note_photo(&self, note_id: NoteId, path: &str) -> Result<PhotoId> {
        self.ensure_exists("note", "notes", "note_id", note_id)?;
        self.attach_photo("notes_photos", "notes_id", note_id, path)
    }
}
