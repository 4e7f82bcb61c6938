use model::Table;

use crate::branding::ImageAsset;

/// A single piece of output placed on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Header(String),
    Subheader(String),
    Info(String),
    Success(String),
    Error(String),
    Image(ImageAsset),
    Table(Table),
}

/// Full snapshot of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub title: String,
    pub sidebar: Vec<Element>,
    pub main: Vec<Element>,
}

impl PageView {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sidebar: Vec::new(),
            main: Vec::new(),
        }
    }

    /// Iterates over every element, sidebar first.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.sidebar.iter().chain(&self.main)
    }

    /// Returns the error messages shown anywhere on the page.
    pub fn errors(&self) -> Vec<&str> {
        self.elements()
            .filter_map(|e| match e {
                Element::Error(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the success messages shown in the main area.
    pub fn successes(&self) -> Vec<&str> {
        self.main
            .iter()
            .filter_map(|e| match e {
                Element::Success(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the first table in the main area.
    pub fn table(&self) -> Option<&Table> {
        self.main.iter().find_map(|e| match e {
            Element::Table(t) => Some(t),
            _ => None,
        })
    }
}
