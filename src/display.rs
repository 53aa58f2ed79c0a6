//! Rendering of search hits for the terminal.

use crate::models::SearchHit;

/// Options for text rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub show_scores: bool,
}

/// One card per hit: title line, genre line, separator.
///
/// ```text
/// 1. The Matrix (1999)
///    Genre: Action|Sci-Fi|Thriller
/// ---
/// ```
pub fn render_hits(hits: &[SearchHit], opts: RenderOptions) -> String {
    let mut out = String::new();
    if hits.is_empty() {
        out.push_str("No results found.\n");
        return out;
    }

    for hit in hits {
        if opts.show_scores {
            out.push_str(&format!("{}. {} [{:.4}]\n", hit.rank, hit.title, hit.score));
        } else {
            out.push_str(&format!("{}. {}\n", hit.rank, hit.title));
        }
        let genres = if hit.genres.is_empty() { "(none)" } else { hit.genres.as_str() };
        out.push_str(&format!("   Genre: {}\n", genres));
        out.push_str("---\n");
    }
    out
}

/// Hits as a pretty-printed JSON array.
pub fn render_json(hits: &[SearchHit]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(rank: usize, title: &str, genres: &str, score: f64) -> SearchHit {
        SearchHit {
            rank,
            index: rank - 1,
            movie_id: None,
            title: title.to_string(),
            genres: genres.to_string(),
            score,
        }
    }

    #[test]
    fn test_render_cards() {
        let hits = vec![
            hit(1, "The Matrix", "Action|Sci-Fi", 0.71),
            hit(2, "Untitled", "", 0.0),
        ];
        let text = render_hits(&hits, RenderOptions::default());
        assert_eq!(
            text,
            "1. The Matrix\n   Genre: Action|Sci-Fi\n---\n2. Untitled\n   Genre: (none)\n---\n"
        );
    }

    #[test]
    fn test_render_with_scores() {
        let hits = vec![hit(1, "Heat", "Action", 1.0)];
        let text = render_hits(&hits, RenderOptions { show_scores: true });
        assert!(text.starts_with("1. Heat [1.0000]\n"));
    }

    #[test]
    fn test_render_no_hits() {
        assert_eq!(render_hits(&[], RenderOptions::default()), "No results found.\n");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&[hit(1, "Heat", "Action|Crime", 0.5)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["title"], "Heat");
        assert_eq!(value[0]["genres"], "Action|Crime");
        assert_eq!(value[0]["rank"], 1);
        assert!(value[0].get("movie_id").is_none());
    }
}
