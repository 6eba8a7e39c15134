//! Paginated card carousel.
//!
//! The carousel owns a frozen snapshot of catalog items and a page cursor.
//! Rendering is a separate pass over the visible slice, re-run by the owner
//! after every navigation.

use crate::domain::{CatalogItem, ItemKind};
use crate::error::{CatalogError, Result};
use crate::ports::CardRenderer;
use std::fmt;
use tracing::debug;

/// Cards per grid row, independent of the page size
pub const GRID_COLUMNS: usize = 3;

/// Pagination state of a carousel
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub items: Vec<CatalogItem>,
    pub page_size: usize,
    pub current_page: usize,
}

impl PageState {
    /// Number of pages; zero for an empty list
    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn last_page(&self) -> usize {
        self.page_count().saturating_sub(1)
    }
}

/// "current of total" pair shown under the cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLabel {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.current, self.total)
    }
}

/// Cell of the 3-column card grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: usize,
    pub column: usize,
}

impl GridPosition {
    pub fn for_index(index: usize) -> Self {
        Self {
            row: index / GRID_COLUMNS,
            column: index % GRID_COLUMNS,
        }
    }
}

/// Everything a renderer needs to draw one card
#[derive(Debug, Clone, Copy)]
pub struct Card<'a> {
    pub kind: ItemKind,
    pub placeholder_path: &'static str,
    /// Position of the item in the full list, not in the page
    pub index: usize,
    pub width_px: u32,
    pub grid: GridPosition,
    pub item: &'a CatalogItem,
}

/// Estimated card width: 80% of the layout width split over the grid columns
pub fn card_width(layout_width: u32) -> u32 {
    (u64::from(layout_width) * 4 / (5 * GRID_COLUMNS as u64)) as u32
}

#[derive(Debug, Clone)]
pub struct Carousel {
    kind: ItemKind,
    state: PageState,
}

impl Carousel {
    pub fn new(kind: ItemKind, items: Vec<CatalogItem>, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(CatalogError::InvalidConfiguration(
                "page size must be at least 1".to_string(),
            ));
        }

        debug!(%kind, items = items.len(), page_size, "creating carousel");
        Ok(Self {
            kind,
            state: PageState {
                items,
                page_size,
                current_page: 0,
            },
        })
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.state.items
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn page_count(&self) -> usize {
        self.state.page_count()
    }

    /// Items of the current page paired with their absolute index
    pub fn visible_slice(&self) -> Vec<(usize, &CatalogItem)> {
        let len = self.state.items.len();
        let start = self.state.current_page * self.state.page_size;
        if start >= len {
            return Vec::new();
        }
        let end = ((self.state.current_page + 1) * self.state.page_size).min(len);

        self.state.items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, item)| (start + offset, item))
            .collect()
    }

    /// Moves one page back; returns false when already on the first page
    pub fn go_to_previous_page(&mut self) -> bool {
        if self.state.current_page == 0 {
            return false;
        }
        self.state.current_page -= 1;
        debug!(page = self.state.current_page, "carousel moved back");
        true
    }

    /// Moves one page forward; returns false when already on the last page
    pub fn go_to_next_page(&mut self) -> bool {
        if self.state.current_page >= self.state.last_page() {
            return false;
        }
        self.state.current_page += 1;
        debug!(page = self.state.current_page, "carousel moved forward");
        true
    }

    /// One-based current page and total page count. An empty carousel reads "1 of 0".
    pub fn page_label(&self) -> PageLabel {
        PageLabel {
            current: self.state.current_page + 1,
            total: self.state.page_count(),
        }
    }

    /// Cards of the current page, ready for a renderer
    pub fn cards(&self, layout_width: u32) -> Vec<Card<'_>> {
        let width_px = card_width(layout_width);
        self.visible_slice()
            .into_iter()
            .map(|(index, item)| Card {
                kind: self.kind,
                placeholder_path: self.kind.placeholder_path(),
                index,
                width_px,
                grid: GridPosition::for_index(index),
                item,
            })
            .collect()
    }

    /// Redraws the current page and its label from scratch
    pub fn render(&self, renderer: &mut dyn CardRenderer, layout_width: u32) -> Result<()> {
        renderer.clear();
        for card in self.cards(layout_width) {
            renderer.render_card(&card)?;
        }
        renderer.render_page_label(self.page_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Article, Recipe};

    fn recipes(count: usize) -> Vec<CatalogItem> {
        (0..count)
            .map(|i| {
                CatalogItem::Recipe(Recipe {
                    id: i as i64 + 1,
                    title: format!("Recipe {}", i),
                    utensils: String::new(),
                    ingredients: String::new(),
                    steps: String::new(),
                    last_modified: "2024-05-01 12:00:00".to_string(),
                    author: None,
                    photo_path: None,
                    notes: Vec::new(),
                })
            })
            .collect()
    }

    fn indices(carousel: &Carousel) -> Vec<usize> {
        carousel.visible_slice().into_iter().map(|(i, _)| i).collect()
    }

    #[derive(Default)]
    struct RecordingRenderer {
        clears: usize,
        cards: Vec<(ItemKind, &'static str, usize, u32, i64)>,
        labels: Vec<PageLabel>,
    }

    impl CardRenderer for RecordingRenderer {
        fn clear(&mut self) {
            self.clears += 1;
            self.cards.clear();
        }

        fn render_card(&mut self, card: &Card<'_>) -> Result<()> {
            self.cards.push((card.kind, card.placeholder_path, card.index, card.width_px, card.item.id()));
            Ok(())
        }

        fn render_page_label(&mut self, label: PageLabel) -> Result<()> {
            self.labels.push(label);
            Ok(())
        }
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let result = Carousel::new(ItemKind::Recipe, recipes(3), 0);
        assert!(matches!(result, Err(CatalogError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_seven_items_in_pages_of_three() {
        let mut carousel = Carousel::new(ItemKind::Recipe, recipes(7), 3).unwrap();
        assert_eq!(indices(&carousel), vec![0, 1, 2]);
        assert_eq!(carousel.page_label(), PageLabel { current: 1, total: 3 });

        assert!(carousel.go_to_next_page());
        assert_eq!(indices(&carousel), vec![3, 4, 5]);

        assert!(carousel.go_to_next_page());
        assert_eq!(indices(&carousel), vec![6]);
        assert_eq!(carousel.page_label(), PageLabel { current: 3, total: 3 });

        assert!(!carousel.go_to_next_page());
        assert_eq!(carousel.current_page(), 2);
        assert_eq!(indices(&carousel), vec![6]);
    }

    #[test]
    fn test_empty_carousel() {
        let mut carousel = Carousel::new(ItemKind::Article, Vec::new(), 3).unwrap();
        assert!(carousel.visible_slice().is_empty());
        assert_eq!(carousel.page_label(), PageLabel { current: 1, total: 0 });
        assert_eq!(carousel.page_label().to_string(), "1 of 0");

        assert!(!carousel.go_to_next_page());
        assert!(!carousel.go_to_previous_page());
        assert_eq!(carousel.current_page(), 0);
    }

    #[test]
    fn test_previous_on_first_page_is_noop() {
        let mut carousel = Carousel::new(ItemKind::Recipe, recipes(5), 2).unwrap();
        let before = carousel.state().clone();
        assert!(!carousel.go_to_previous_page());
        assert_eq!(carousel.state(), &before);
    }

    #[test]
    fn test_pages_cover_items_without_gap_or_overlap() {
        for len in 0..20 {
            for page_size in 1..8 {
                let items = recipes(len);
                let mut carousel = Carousel::new(ItemKind::Recipe, items.clone(), page_size).unwrap();
                let mut seen = Vec::new();
                loop {
                    let slice = carousel.visible_slice();
                    assert!(slice.len() <= page_size);
                    if len > 0 {
                        assert!(!slice.is_empty());
                    }
                    seen.extend(slice.into_iter().map(|(_, item)| item.clone()));
                    if !carousel.go_to_next_page() {
                        break;
                    }
                }
                assert_eq!(seen, items, "len={} page_size={}", len, page_size);
            }
        }
    }

    #[test]
    fn test_next_then_previous_restores_page() {
        let mut carousel = Carousel::new(ItemKind::Recipe, recipes(10), 4).unwrap();
        assert!(carousel.go_to_next_page());
        let page = carousel.current_page();

        assert!(carousel.go_to_next_page());
        assert!(carousel.go_to_previous_page());
        assert_eq!(carousel.current_page(), page);

        assert!(carousel.go_to_previous_page());
        assert!(carousel.go_to_next_page());
        assert_eq!(carousel.current_page(), page);
    }

    #[test]
    fn test_grid_position_wraps_every_three() {
        let rows: Vec<usize> = (0..9).map(|i| GridPosition::for_index(i).row).collect();
        let columns: Vec<usize> = (0..9).map(|i| GridPosition::for_index(i).column).collect();
        assert_eq!(rows, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);
        assert_eq!(columns, vec![0, 1, 2, 0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_grid_position_ignores_page_size() {
        let mut carousel = Carousel::new(ItemKind::Recipe, recipes(8), 4).unwrap();
        carousel.go_to_next_page();
        let cells: Vec<(usize, usize)> = carousel
            .cards(900)
            .iter()
            .map(|card| (card.grid.row, card.grid.column))
            .collect();
        assert_eq!(cells, vec![(1, 1), (1, 2), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_card_width_truncates() {
        assert_eq!(card_width(900), 240);
        assert_eq!(card_width(1000), 266);
        assert_eq!(card_width(0), 0);
    }

    #[test]
    fn test_render_dispatches_by_kind_and_redraws() {
        let articles: Vec<CatalogItem> = (1..=4)
            .map(|id| {
                CatalogItem::Article(Article {
                    id,
                    title: format!("Article {}", id),
                    content: String::new(),
                    author: None,
                    publish_date: String::new(),
                    photo_path: None,
                })
            })
            .collect();
        let mut carousel = Carousel::new(ItemKind::Article, articles, 3).unwrap();
        let mut renderer = RecordingRenderer::default();

        carousel.render(&mut renderer, 1200).unwrap();
        assert_eq!(renderer.cards.len(), 3);
        assert_eq!(
            renderer.cards[0],
            (ItemKind::Article, ItemKind::Article.placeholder_path(), 0, 320, 1)
        );

        carousel.go_to_next_page();
        carousel.render(&mut renderer, 1200).unwrap();
        assert_eq!(renderer.clears, 2);
        assert_eq!(renderer.cards, vec![(ItemKind::Article, ItemKind::Article.placeholder_path(), 3, 320, 4)]);
        assert_eq!(
            renderer.labels,
            vec![PageLabel { current: 1, total: 2 }, PageLabel { current: 2, total: 2 }]
        );
    }
}
