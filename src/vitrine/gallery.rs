//! Per-item paging of text and photos on the detail page.

use crate::model::CatalogItem;

/// Text pages of an item: `texts`, else the description, else one blank page.
pub fn text_pages(item: &CatalogItem) -> Vec<&str> {
    if !item.texts.is_empty() {
        return item.texts.iter().map(String::as_str).collect();
    }
    vec![item.description.as_deref().unwrap_or("")]
}

/// Steps through text pages, stopping at either end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextPager {
    index: usize,
}

impl TextPager {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn next(&mut self, pages: usize) -> bool {
        if self.index + 1 >= pages {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn counter(&self, pages: usize) -> String {
        format!("{} / {}", self.index + 1, pages)
    }
}

/// Cycles through photos, wrapping around at either end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhotoCarousel {
    index: usize,
}

impl PhotoCarousel {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn next(&mut self, photos: usize) {
        if photos > 0 {
            self.index = (self.index + 1) % photos;
        }
    }

    pub fn previous(&mut self, photos: usize) {
        if photos > 0 {
            self.index = (self.index + photos - 1) % photos;
        }
    }

    pub fn counter(&self, photos: usize) -> String {
        format!("{} / {}", self.index + 1, photos)
    }
}
