use crate::measure::TextMeasure;

/// Pixel buffer kept free at the bottom of the box so glyphs are never clipped.
pub const SAFETY_MARGIN: f64 = 10.0;

pub fn paginate(text: &str, max_height: f64, measure: &dyn TextMeasure) -> Vec<String> {
    paginate_with(text, max_height, |candidate| measure.measure(candidate))
}

/// Splits `text` into pages whose measured height stays within
/// `max_height - SAFETY_MARGIN`.
///
/// Pages are grown one character at a time; the character that overflows
/// starts the next page. Each committed page loses its leading whitespace and
/// whitespace-only pages are dropped. A character that overflows on its own
/// becomes a page by itself, so every character is measured exactly once.
///
/// A degenerate height returns the whole text as a single page, as does a text
/// that yields no pages at all.
pub fn paginate_with<F>(text: &str, max_height: f64, mut measure: F) -> Vec<String>
where
    F: FnMut(&str) -> f64,
{
    let limit = max_height - SAFETY_MARGIN;
    if !limit.is_finite() || limit <= 0.0 {
        return vec![text.to_string()];
    }

    let mut pages = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for ch in text.chars() {
        current.push(ch);
        current_chars += 1;
        if measure(&current) <= limit {
            continue;
        }

        if current_chars == 1 {
            commit_page(&mut pages, &current);
            current.clear();
            current_chars = 0;
            continue;
        }

        current.pop();
        commit_page(&mut pages, &current);
        current.clear();
        current.push(ch);
        current_chars = 1;
    }

    if !current.trim().is_empty() {
        commit_page(&mut pages, &current);
    }

    if pages.is_empty() {
        return vec![text.to_string()];
    }
    tracing::trace!(pages = pages.len(), "paginated text");
    pages
}

fn commit_page(pages: &mut Vec<String>, raw: &str) {
    let page = raw.trim_start();
    if !page.is_empty() {
        pages.push(page.to_string());
    }
}
