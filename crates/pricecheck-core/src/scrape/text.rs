use ego_tree::iter::Edge;
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

/// Human-visible text of an HTML page: text nodes trimmed and joined by single
/// spaces, with scripting and template content left out.
///
/// Walks the tree iteratively, so nesting depth is bounded by the heap only.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();
    let mut hidden_depth = 0usize;

    for edge in document.root_element().traverse() {
        match edge {
            Edge::Open(node) if is_hidden(node) => hidden_depth += 1,
            Edge::Close(node) if is_hidden(node) => hidden_depth -= 1,
            Edge::Open(node) if hidden_depth == 0 => {
                if let Node::Text(text) = node.value() {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        parts.push(trimmed);
                    }
                }
            }
            _ => {}
        }
    }

    parts.join(" ")
}

fn is_hidden(node: NodeRef<'_, Node>) -> bool {
    match node.value() {
        Node::Element(element) => matches!(
            element.name(),
            "script" | "style" | "noscript" | "template"
        ),
        _ => false,
    }
}
