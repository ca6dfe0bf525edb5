//! Example: reflow a two-column article for a wide screen
//!
//! Run with `RUST_LOG=reflow_sync=trace` to watch individual rule writes.

use reflow_css::RuleSheet;
use reflow_dom::Document;
use reflow_sync::{ForceRuleRegistry, StyleSync};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("reflow_sync=debug".parse().unwrap()))
        .init();

    let mut doc = Document::new("https://example.com/article");
    let body = doc.body();
    let main = doc.append_element_with_id(body, "main", "content").unwrap();
    let article = doc.append_element(main, "article").unwrap();
    let aside = doc.append_element(main, "aside").unwrap();
    let banner = doc.append_element(body, "div").unwrap();
    doc.tree_mut().set_attribute(aside, "data-force-css", "width").unwrap();

    let mut sync = StyleSync::new(doc, RuleSheet::new());

    // First cycle: lay the two columns side by side.
    sync.request_style(main, "display", "flex");
    sync.request_style(article, "flex", "2");
    sync.request_style(aside, "flex", "1");
    sync.request_style(aside, "width", "300px");
    sync.request_removal(banner);
    sync.flush();

    // Second cycle: a producer repeats itself and narrows the article.
    sync.request_style(main, "display", "flex");
    sync.request_style(article, "max-width", "60vw");
    sync.flush();

    let mut overrides = ForceRuleRegistry::new(RuleSheet::new());
    overrides.append_rule("body > .cookie-banner", &[("display", "none")]);

    println!("reflow-sync v{}", reflow_sync::VERSION);
    println!("-- managed rules --\n{}", sync.sheet().to_css());
    println!("-- force rules --\n{}", overrides.sheet().to_css());
    println!("{:?}", sync.stats());
}
