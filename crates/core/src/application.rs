use crate::carousel::{Carousel, PageLabel};
use crate::config::CarouselConfig;
use crate::domain::{CatalogItem, ItemKind};
use crate::error::Result;
use crate::ports::{CardRenderer, CatalogRepository};
use tracing::{debug, info};

/// Application service that turns store snapshots into carousels
pub struct CatalogService {
    repository: Box<dyn CatalogRepository>,
}

impl CatalogService {
    /// Creates a new CatalogService backed by the given repository
    pub fn new(repository: Box<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &dyn CatalogRepository {
        self.repository.as_ref()
    }

    /// Fetches the current snapshot of every record of one kind
    pub fn load_items(&self, kind: ItemKind) -> Result<Vec<CatalogItem>> {
        let items: Vec<CatalogItem> = match kind {
            ItemKind::Recipe => self
                .repository
                .list_recipes()?
                .into_iter()
                .map(CatalogItem::from)
                .collect(),
            ItemKind::Article => self
                .repository
                .list_articles()?
                .into_iter()
                .map(CatalogItem::from)
                .collect(),
        };
        debug!(%kind, count = items.len(), "loaded catalog snapshot");
        Ok(items)
    }

    pub fn open_carousel(&self, kind: ItemKind, config: &CarouselConfig) -> Result<Carousel> {
        config.validate()?;
        let items = self.load_items(kind)?;
        Carousel::new(kind, items, config.page_size)
    }
}

/// A carousel bound to its rendering surface.
///
/// Every navigation command redraws the page and refreshes the label, whether
/// or not the cursor moved.
pub struct CarouselScreen<R: CardRenderer> {
    carousel: Carousel,
    renderer: R,
    layout_width: u32,
}

impl<R: CardRenderer> CarouselScreen<R> {
    /// Binds the carousel to a renderer and draws the first page
    pub fn new(carousel: Carousel, renderer: R, layout_width: u32) -> Result<Self> {
        let mut screen = Self {
            carousel,
            renderer,
            layout_width,
        };
        screen.refresh()?;
        info!(kind = %screen.carousel.kind(), label = %screen.label(), "carousel screen opened");
        Ok(screen)
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn label(&self) -> PageLabel {
        self.carousel.page_label()
    }

    /// Goes one page back and redraws; returns whether the page changed
    pub fn previous(&mut self) -> Result<bool> {
        let moved = self.carousel.go_to_previous_page();
        self.refresh()?;
        Ok(moved)
    }

    /// Goes one page forward and redraws; returns whether the page changed
    pub fn next(&mut self) -> Result<bool> {
        let moved = self.carousel.go_to_next_page();
        self.refresh()?;
        Ok(moved)
    }

    fn refresh(&mut self) -> Result<()> {
        self.carousel.render(&mut self.renderer, self.layout_width)
    }
}
