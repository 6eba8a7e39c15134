use crate::carousel::{Card, PageLabel};
use crate::domain::{
    Article, ArticleDraft, ArticleId, Note, NoteDraft, NoteId, PhotoId, Recipe, RecipeDraft,
    RecipeId,
};
use crate::error::Result;

/// Persistence contract for recipes, articles, notes and photo associations.
///
/// The carousel only ever consumes `list_recipes` and `list_articles`; the
/// rest is used by the editing commands.
pub trait CatalogRepository {
    /// Creates the tables if they do not exist yet
    fn init_schema(&self) -> Result<()>;

    // Fetches every recipe with its primary photo and its notes
    fn list_recipes(&self) -> Result<Vec<Recipe>>;
    fn find_recipe(&self, id: RecipeId) -> Result<Option<Recipe>>;
    fn create_recipe(&self, draft: &RecipeDraft, author: Option<&str>) -> Result<RecipeId>;
    fn update_recipe(&self, id: RecipeId, draft: &RecipeDraft) -> Result<()>;
    fn delete_recipe(&self, id: RecipeId) -> Result<()>;

    // Fetches every article with its primary photo
    fn list_articles(&self) -> Result<Vec<Article>>;
    fn find_article(&self, id: ArticleId) -> Result<Option<Article>>;
    fn create_article(&self, draft: &ArticleDraft) -> Result<ArticleId>;
    fn update_article(&self, id: ArticleId, draft: &ArticleDraft) -> Result<()>;
    fn delete_article(&self, id: ArticleId) -> Result<()>;

    fn add_note(&self, recipe_id: RecipeId, draft: &NoteDraft) -> Result<NoteId>;
    fn find_note(&self, id: NoteId) -> Result<Option<Note>>;
    fn notes_for_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Note>>;
    fn update_note(&self, id: NoteId, draft: &NoteDraft) -> Result<()>;
    fn delete_note(&self, id: NoteId) -> Result<()>;

    /// Registers a photo path, returning the existing id when already known
    fn add_photo(&self, path: &str) -> Result<PhotoId>;
    fn attach_recipe_photo(&self, recipe_id: RecipeId, path: &str) -> Result<PhotoId>;
    fn attach_article_photo(&self, article_id: ArticleId, path: &str) -> Result<PhotoId>;
    fn attach_note_photo(&self, note_id: NoteId, path: &str) -> Result<PhotoId>;
}

/// Rendering surface for carousel pages.
/// This is a port (interface) that defines how the core draws cards without knowing the UI.
pub trait CardRenderer {
    /// Drops every card of the previous page
    fn clear(&mut self);

    fn render_card(&mut self, card: &Card<'_>) -> Result<()>;

    fn render_page_label(&mut self, label: PageLabel) -> Result<()>;
}
