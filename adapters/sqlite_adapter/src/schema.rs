//! Table layout of the catalog database

pub(crate) const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    recipe_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    title         TEXT NOT NULL,
    utensils      TEXT NOT NULL DEFAULT '',
    ingredients   TEXT NOT NULL DEFAULT '',
    steps         TEXT NOT NULL DEFAULT '',
    last_modified TEXT NOT NULL,
    author        TEXT
);

CREATE TABLE IF NOT EXISTS articles (
    article_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL,
    content      TEXT NOT NULL DEFAULT '',
    author       TEXT,
    publish_date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS photos (
    photo_id INTEGER PRIMARY KEY AUTOINCREMENT,
    path     TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS recipe_photos (
    recipe_id INTEGER NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
    photo_id  INTEGER NOT NULL REFERENCES photos(photo_id) ON DELETE CASCADE,
    PRIMARY KEY (recipe_id, photo_id)
);

CREATE TABLE IF NOT EXISTS article_photos (
    article_id INTEGER NOT NULL REFERENCES articles(article_id) ON DELETE CASCADE,
    photo_id   INTEGER NOT NULL REFERENCES photos(photo_id) ON DELETE CASCADE,
    PRIMARY KEY (article_id, photo_id)
);

CREATE TABLE IF NOT EXISTS notes (
    note_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL,
    content      TEXT NOT NULL DEFAULT '',
    publish_date TEXT NOT NULL,
    recipe_id    INTEGER NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS notes_photos (
    notes_id INTEGER NOT NULL REFERENCES notes(note_id) ON DELETE CASCADE,
    photo_id INTEGER NOT NULL REFERENCES photos(photo_id) ON DELETE CASCADE,
    PRIMARY KEY (notes_id, photo_id)
);

CREATE INDEX IF NOT EXISTS idx_notes_recipe ON notes(recipe_id);
"#;

// The primary photo of a record is its linked photo with the lowest photo id
pub(crate) const SELECT_RECIPES: &str = r#"
SELECT
    r.recipe_id,
    r.title,
    r.utensils,
    r.ingredients,
    r.steps,
    r.last_modified,
    r.author,
    (SELECT p.path
       FROM recipe_photos rp
       JOIN photos p ON p.photo_id = rp.photo_id
      WHERE rp.recipe_id = r.recipe_id
      ORDER BY rp.photo_id
      LIMIT 1) AS path
FROM recipes r
"#;

pub(crate) const SELECT_ARTICLES: &str = r#"
SELECT
    a.article_id,
    a.title,
    a.content,
    a.author,
    a.publish_date,
    (SELECT p.path
       FROM article_photos ap
       JOIN photos p ON p.photo_id = ap.photo_id
      WHERE ap.article_id = a.article_id
      ORDER BY ap.photo_id
      LIMIT 1) AS path
FROM articles a
"#;

pub(crate) const SELECT_NOTES: &str =
    "SELECT note_id, recipe_id, title, content, publish_date FROM notes";

pub(crate) const SELECT_NOTE_PHOTOS: &str = r#"
SELECT p.path
FROM notes_photos np
JOIN photos p ON p.photo_id = np.photo_id
WHERE np.notes_id = ?1
ORDER BY np.photo_id
"#;
