use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type RecipeId = i64;
pub type ArticleId = i64;
pub type NoteId = i64;
pub type PhotoId = i64;

/// A note attached to a recipe, with its own photos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub recipe_id: RecipeId,
    pub title: String,
    pub content: String,
    pub publish_date: String,
    pub image_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub utensils: String,
    pub ingredients: String,
    pub steps: String,
    pub last_modified: String,
    /// `Some("user")` for recipes created from the app, `None` for seeded ones
    pub author: Option<String>,
    pub photo_path: Option<String>,
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub publish_date: String,
    pub photo_path: Option<String>,
}

/// Editable fields of a recipe
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub title: String,
    pub utensils: String,
    pub ingredients: String,
    pub steps: String,
}

/// Editable fields of an article
#[derive(Debug, Clone, Default)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
}

/// Editable fields of a note
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

/// Which kind of record a carousel pages through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Recipe,
    Article,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Recipe => "recipe",
            ItemKind::Article => "article",
        }
    }

    /// Image shown on a card while the item's own photo is not loaded
    pub fn placeholder_path(&self) -> &'static str {
        match self {
            ItemKind::Recipe => "assets/images/images_recipe/image_pork_belly.png",
            ItemKind::Article => "assets/images/images_article/indonesia_cuisine.jpg",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recipe" | "recipes" => Ok(ItemKind::Recipe),
            "article" | "articles" => Ok(ItemKind::Article),
            other => Err(format!("unknown item kind '{}' (expected recipe or article)", other)),
        }
    }
}

/// A record shown as a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogItem {
    Recipe(Recipe),
    Article(Article),
}

impl CatalogItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            CatalogItem::Recipe(_) => ItemKind::Recipe,
            CatalogItem::Article(_) => ItemKind::Article,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            CatalogItem::Recipe(recipe) => recipe.id,
            CatalogItem::Article(article) => article.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CatalogItem::Recipe(recipe) => &recipe.title,
            CatalogItem::Article(article) => &article.title,
        }
    }

    pub fn image_path(&self) -> Option<&str> {
        match self {
            CatalogItem::Recipe(recipe) => recipe.photo_path.as_deref(),
            CatalogItem::Article(article) => article.photo_path.as_deref(),
        }
    }
}

impl From<Recipe> for CatalogItem {
    fn from(recipe: Recipe) -> Self {
        CatalogItem::Recipe(recipe)
    }
}

impl From<Article> for CatalogItem {
    fn from(article: Article) -> Self {
        CatalogItem::Article(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: i64, photo: Option<&str>) -> Article {
        Article {
            id,
            title: format!("Article {}", id),
            content: String::new(),
            author: None,
            publish_date: "2024-01-01 00:00:00".to_string(),
            photo_path: photo.map(str::to_string),
        }
    }

    #[test]
    fn test_item_kind_parses_singular_and_plural() {
        assert_eq!("recipe".parse::<ItemKind>(), Ok(ItemKind::Recipe));
        assert_eq!("Articles".parse::<ItemKind>(), Ok(ItemKind::Article));
        assert!("photo".parse::<ItemKind>().is_err());
    }

    #[test]
    fn test_placeholder_paths_follow_kind_folder() {
        assert!(ItemKind::Recipe.placeholder_path().starts_with("assets/images/images_recipe/"));
        assert!(ItemKind::Article.placeholder_path().starts_with("assets/images/images_article/"));
    }

    #[test]
    fn test_catalog_item_accessors() {
        let item = CatalogItem::from(article(4, Some("photos/a.jpg")));
        assert_eq!(item.kind(), ItemKind::Article);
        assert_eq!(item.id(), 4);
        assert_eq!(item.title(), "Article 4");
        assert_eq!(item.image_path(), Some("photos/a.jpg"));

        let bare = CatalogItem::from(article(5, None));
        assert_eq!(bare.image_path(), None);
    }
}
