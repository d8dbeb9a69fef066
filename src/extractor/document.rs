//! Navigable document abstraction used by the extractor
//!
//! The extraction rules only need three capabilities from a parsed page:
//! find elements by CSS selector, remove an element with its subtree, and
//! read the concatenated text of an element. `Document` captures exactly that
//! so the rules can run against a parsed HTML tree or an in-memory fixture.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::extractor::error::ExtractError;

/// A parsed document the extractor can query and prune
pub trait Document {
    /// Handle to an element in the document
    type Node: Copy;

    /// All elements matching `selector`, in document order
    fn select(&self, selector: &str) -> Result<Vec<Self::Node>, ExtractError>;

    /// All elements matching `selector` below `scope`, in document order
    fn select_in(&self, scope: Self::Node, selector: &str)
    -> Result<Vec<Self::Node>, ExtractError>;

    /// Remove `node` and everything below it from the document
    fn remove(&mut self, node: Self::Node);

    /// Concatenated text of `node` and its descendants
    fn text(&self, node: Self::Node) -> String;

    /// First element matching `selector`
    fn select_first(&self, selector: &str) -> Result<Option<Self::Node>, ExtractError> {
        Ok(self.select(selector)?.into_iter().next())
    }

    /// First element matching `selector` below `scope`
    fn select_first_in(
        &self,
        scope: Self::Node,
        selector: &str,
    ) -> Result<Option<Self::Node>, ExtractError> {
        Ok(self.select_in(scope, selector)?.into_iter().next())
    }
}

/// HTML document backed by an html5ever parse tree
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

impl Document for HtmlDocument {
    type Node = NodeId;

    fn select(&self, selector: &str) -> Result<Vec<NodeId>, ExtractError> {
        let selector = parse_selector(selector)?;
        // Walk from the root element so detached subtrees are never matched.
        Ok(self
            .html
            .root_element()
            .select(&selector)
            .map(|element| element.id())
            .collect())
    }

    fn select_in(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, ExtractError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .element(scope)
            .map(|element| element.select(&selector).map(|e| e.id()).collect())
            .unwrap_or_default())
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(node) {
            node.detach();
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| element.text().collect())
            .unwrap_or_default()
    }
}
