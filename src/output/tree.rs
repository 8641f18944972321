//! Indented text rendering of a page graph
//!
//! Legend:
//! - `❆` page (`✗` appended when it failed)
//! - `↳` link, followed by its quoted label and the linked sub-tree
//! - `▤` static asset
//! - `↺` page already visited; rendered as a leaf

use crate::graph::{PageGraph, PageId};

const PAGE: &str = "❆";
const LINK: &str = "↳";
const ASSET: &str = "▤";
const VISITED: &str = "↺";
const FAILED: &str = "✗";

/// Indentation added for every nesting level
const INDENT: &str = "    ";

/// One unit of pending output
enum Piece {
    /// A line break followed by the indentation of `depth` levels
    Newline(usize),
    Text(String),
    /// A whole page sub-tree, expanded when reached
    Page { id: PageId, depth: usize },
}

/// Renders the graph as an indented tree starting at the root page
pub fn render_tree(graph: &PageGraph) -> String {
    render_page(graph, graph.root())
}

/// Renders one page and every link it owns
///
/// Back-reference links print the target URL with the visited marker
/// instead of descending, so rendering stays finite on cyclic graphs.
/// Sub-trees are expanded from an explicit stack, so the nesting depth of
/// the graph never turns into call depth.
pub fn render_page(graph: &PageGraph, id: PageId) -> String {
    let mut out = String::new();
    let mut pending = vec![Piece::Page { id, depth: 0 }];

    while let Some(piece) = pending.pop() {
        match piece {
            Piece::Newline(depth) => {
                out.push('\n');
                for _ in 0..depth {
                    out.push_str(INDENT);
                }
            }
            Piece::Text(text) => out.push_str(&text),
            Piece::Page { id, depth } => {
                let mut pieces = page_pieces(graph, id, depth);
                pieces.reverse();
                pending.extend(pieces);
            }
        }
    }

    out
}

/// Lays out a single page, leaving owned sub-trees as unexpanded pieces
fn page_pieces(graph: &PageGraph, id: PageId, depth: usize) -> Vec<Piece> {
    let Some(page) = graph.get(id) else {
        return Vec::new();
    };

    let header = if page.fetch_failed() {
        format!("{} {} {}", PAGE, page.url(), FAILED)
    } else {
        format!("{} {}", PAGE, page.url())
    };
    let mut pieces = vec![
        Piece::Newline(depth),
        Piece::Text(header),
        Piece::Newline(depth),
    ];

    if !page.static_assets().is_empty() {
        pieces.push(Piece::Newline(depth));
        for (i, asset) in page.static_assets().iter().enumerate() {
            if i > 0 {
                pieces.push(Piece::Newline(depth));
            }
            pieces.push(Piece::Text(format!("  {}  {}", ASSET, asset)));
        }
        pieces.push(Piece::Newline(depth));
    }

    if !page.links().is_empty() {
        pieces.push(Piece::Newline(depth));
        for (i, link) in page.links().iter().enumerate() {
            if i > 0 {
                pieces.push(Piece::Newline(depth));
            }
            pieces.push(Piece::Text(format!("  {} \"{}\"", LINK, link.label())));
            pieces.push(Piece::Newline(depth));
            pieces.push(Piece::Text("  ".to_string()));

            match (link.target(), graph.target(link)) {
                (Some(_), Some(target)) if link.is_back_reference() => {
                    pieces.push(Piece::Newline(depth));
                    pieces.push(Piece::Text(format!(
                        "{}{} {} {}",
                        INDENT,
                        PAGE,
                        target.url(),
                        VISITED
                    )));
                }
                (Some(target), Some(_)) => pieces.push(Piece::Page {
                    id: target,
                    depth: depth + 1,
                }),
                _ => {}
            }
        }
        pieces.push(Piece::Newline(depth));
    }

    pieces
}

/// Banner printed before the tree, including the symbol legend
pub fn render_banner(seed: &str) -> String {
    format!(
        "
ＷＥＢ ＣＲＡＷＬＥＲ - {seed}

┏━━━━━━━━━━━━━━━━━━━━━━┓
┃ Legend               ┃
┃──────────────────────┃
┃                      ┃
┃ {PAGE} Page               ┃
┃ {LINK} Link               ┃
┃ {ASSET} Static Asset       ┃
┃ {VISITED} Already visited    ┃
┃ {FAILED} Failed             ┃
┃                      ┃
┗━━━━━━━━━━━━━━━━━━━━━━┛
",
        seed = seed,
        PAGE = PAGE,
        LINK = LINK,
        ASSET = ASSET,
        VISITED = VISITED,
        FAILED = FAILED,
    )
}
