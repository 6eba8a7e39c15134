use catalog_core::carousel::{Card, Carousel, PageLabel};
use catalog_core::domain::{Article, CatalogItem, ItemKind, Recipe};
use catalog_core::error::{CatalogError, Result};
use catalog_core::ports::CardRenderer;
use catalog_core::utils::format_timestamp_for_display;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Card renderer that draws the current carousel page as Markdown
#[derive(Debug, Default)]
pub struct MarkdownCardRenderer {
    cards: String,
    label: Option<PageLabel>,
}

impl MarkdownCardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered page: cards followed by the "current of total" line
    pub fn markdown(&self) -> String {
        let mut output = self.cards.clone();
        if let Some(label) = self.label {
            output.push_str(&format!("< {} >\n", label));
        }
        output
    }

    fn push(&mut self, args: std::fmt::Arguments<'_>) -> Result<()> {
        self.cards
            .write_fmt(args)
            .map_err(|e| CatalogError::Render(e.to_string()))
    }

    fn card_header(&mut self, card: &Card<'_>) -> Result<()> {
        self.push(format_args!(
            "## {}. {}\n\n",
            card.index + 1,
            card.item.title()
        ))?;
        self.push(format_args!(
            "*row {}, column {} · {}px*\n\n",
            card.grid.row, card.grid.column, card.width_px
        ))?;
        // Items without a photo fall back to the placeholder of their kind
        let image = card.item.image_path().unwrap_or(card.placeholder_path);
        self.push(format_args!("![{}]({})\n\n", card.item.title(), image))
    }

    fn recipe_card(&mut self, recipe: &Recipe) -> Result<()> {
        if let Some(author) = &recipe.author {
            self.push(format_args!("by {}\n\n", author))?;
        }
        self.push(format_args!(
            "Last modified: {}\n\n",
            format_timestamp_for_display(&recipe.last_modified)
        ))?;

        if recipe.notes.is_empty() {
            return Ok(());
        }
        self.push(format_args!("**Notes ({})**\n\n", recipe.notes.len()))?;
        for note in &recipe.notes {
            self.push(format_args!(
                "- {} *{}*",
                note.title,
                format_timestamp_for_display(&note.publish_date)
            ))?;
            if !note.image_paths.is_empty() {
                self.push(format_args!(" ({} photos)", note.image_paths.len()))?;
            }
            self.push(format_args!("\n"))?;
        }
        self.push(format_args!("\n"))
    }

    fn article_card(&mut self, article: &Article) -> Result<()> {
        self.push(format_args!(
            "*{}*\n\n",
            format_timestamp_for_display(&article.publish_date)
        ))?;
        let excerpt = article.content.trim();
        if excerpt.is_empty() {
            self.push(format_args!("*[No content]*\n\n"))
        } else {
            let excerpt: String = excerpt.chars().take(EXCERPT_CHARS).collect();
            self.push(format_args!("{}\n\n", excerpt))
        }
    }
}

const EXCERPT_CHARS: usize = 140;

impl CardRenderer for MarkdownCardRenderer {
    fn clear(&mut self) {
        self.cards.clear();
        self.label = None;
    }

    fn render_card(&mut self, card: &Card<'_>) -> Result<()> {
        self.card_header(card)?;
        // The carousel's kind picks the card layout
        match (card.kind, card.item) {
            (ItemKind::Recipe, CatalogItem::Recipe(recipe)) => self.recipe_card(recipe)?,
            (ItemKind::Article, CatalogItem::Article(article)) => self.article_card(article)?,
            (kind, item) => {
                return Err(CatalogError::Render(format!(
                    "{} {} cannot be drawn on a {} card",
                    item.kind(),
                    item.id(),
                    kind
                )))
            }
        }
        self.push(format_args!("---\n\n"))
    }

    fn render_page_label(&mut self, label: PageLabel) -> Result<()> {
        self.label = Some(label);
        Ok(())
    }
}

/// Writes every page of the carousel as `<kind>-page-<n>.md` into `output_folder`,
/// starting from the page the carousel is on. Returns the written files.
pub fn export_pages(mut carousel: Carousel, output_folder: &Path, layout_width: u32) -> Result<Vec<PathBuf>> {
    if carousel.items().is_empty() {
        debug!(kind = %carousel.kind(), "nothing to export");
        return Ok(Vec::new());
    }

    // Create output directory if it doesn't exist
    fs::create_dir_all(output_folder)?;

    let mut renderer = MarkdownCardRenderer::new();
    let mut written = Vec::new();
    loop {
        carousel.render(&mut renderer, layout_width)?;

        let label = carousel.page_label();
        let file_path = output_folder.join(format!("{}-page-{}.md", carousel.kind(), label.current));
        let mut content = format!("# {}s {}\n\n", carousel.kind(), label);
        content.push_str(&renderer.markdown());
        fs::write(&file_path, content)?;
        written.push(file_path);

        if !carousel.go_to_next_page() {
            break;
        }
    }

    info!(kind = %carousel.kind(), pages = written.len(), folder = %output_folder.display(), "pages exported");
    Ok(written)
}
