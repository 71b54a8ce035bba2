//! In-memory HTML host for the shorthand engine.
//!
//! This crate provides the concrete collaborators the engine runs against
//! outside a browser:
//!
//! - [`Document`]: an HTML tree parsed with `scraper`, with stable node
//!   handles and CSS selector matching
//! - [`Attributes`]: an editable copy of one element's attributes
//! - [`Loader`] implementations for `load` actions: [`FsLoader`],
//!   [`HttpLoader`] (via `ureq`), [`DefaultLoader`] choosing between them by
//!   scheme, and [`MemoryLoader`] for tests
//! - [`Page`]: a document plus a loader, implementing the engine's host traits
//!
//! # Example
//!
//! ```
//! use shorthand_core::Engine;
//! use shorthand_dom::Page;
//!
//! let html = r#"<button id="close">Close</button><div id="dialog">Hi</div>
//! <script type="text/ShortHand">#close should hide #dialog on click</script>"#;
//!
//! let mut engine = Engine::new(Page::parse(html));
//! engine.parse_scripts();
//!
//! let close = engine.host().first("#close").unwrap();
//! engine.fire(close, "click");
//!
//! assert!(engine.host().to_html().contains(r#"<div id="dialog" style="display: none;">"#));
//! ```
//!
//! Markup is parsed the way a browser parses it, so bare ampersands and
//! omitted end tags are fine:
//!
//! ```
//! use shorthand_core::{Dom, ElementLookup};
//! use shorthand_dom::Page;
//!
//! let page = Page::parse("<ul><li id=q>Tom & Jerry<li id=a>Answer</ul>");
//! let q = page.first("#q").unwrap();
//! let a = page.first("#a").unwrap();
//!
//! assert_eq!(page.next_sibling(q, Some("li")), Some(a));
//! assert_eq!(page.document().text_content(q), "Tom & Jerry");
//! assert!(page.is_visible(a));
//! ```

mod attributes;
mod document;
mod loader;
mod page;

pub use attributes::Attributes;
pub use document::Document;
pub use loader::{DEFAULT_TIMEOUT, DefaultLoader, FsLoader, HttpLoader, Loader, MemoryLoader};
pub use page::Page;
pub use scraper::Selector;
