//! Minimal HTML extraction for the two scraped pages.
//!
//! The pages are small and their markup stable, so tag-level regexes are
//! enough: find the block, split rows and cells, strip tags, decode entities.

use once_cell::sync::Lazy;
use regex::Regex;

static TABLE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<table([^>]*)>").unwrap());
static TABLE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?table\b[^>]*>").unwrap());
static ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").unwrap());
static CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<td([^>]*)>(.*?)</td>").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static PAGE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<div[^>]*class="[^"]*page-header[^"]*"[^>]*>.*?<h1[^>]*>(.*?)</h1>"#).unwrap()
});

/// Tag-free, entity-decoded, whitespace-collapsed text of a fragment.
pub fn clean_text(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    SPACE.replace_all(decoded.trim(), " ").into_owned()
}

fn has_attr(attrs: &str, name: &str, value: &str) -> bool {
    let compact: String = attrs.chars().filter(|c| !c.is_whitespace()).collect();
    compact.contains(&format!("{name}=\"{value}\"")) || compact.contains(&format!("{name}='{value}'"))
}

/// Markup between an opening `<table>` tag ending at `from` and its matching
/// close tag. Nested tables stay inside the body.
fn table_body(html: &str, from: usize) -> &str {
    let rest = &html[from..];
    let mut depth = 1usize;
    for tag in TABLE_TAG.find_iter(rest) {
        if tag.as_str().starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return &rest[..tag.start()];
            }
        } else {
            depth += 1;
        }
    }
    rest
}

/// Cell texts of each `<tr>` in a fragment.
fn rows(fragment: &str) -> Vec<Vec<String>> {
    ROW.captures_iter(fragment)
        .map(|row| {
            CELL.captures_iter(&row[1])
                .map(|cell| clean_text(&cell[2]))
                .collect()
        })
        .collect()
}

/// Scraped station observation page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationReport {
    pub updated: Option<String>,
    /// Parameter name -> value, from the two-column observation table.
    pub parameters: Vec<(String, String)>,
}

impl StationReport {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse a station page. `None` when the observation table is missing.
pub fn parse_station_page(html: &str) -> Option<StationReport> {
    let updated = CELL
        .captures_iter(html)
        .find(|c| has_attr(&c[1], "colspan", "2") && has_attr(&c[1], "align", "right"))
        .map(|c| clean_text(&c[2]))
        .filter(|t| !t.is_empty());

    let open = TABLE_OPEN
        .captures_iter(html)
        .find(|t| has_attr(&t[1], "border", "0") && has_attr(&t[1], "style", "width:100%"))?;
    let table = table_body(html, open.get(0)?.end());

    let parameters = rows(table)
        .into_iter()
        .filter_map(|cells| match <[String; 2]>::try_from(cells) {
            Ok([name, value]) => Some((name, value)),
            Err(_) => None,
        })
        .collect();

    Some(StationReport { updated, parameters })
}

/// Scraped emergency-information page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraInfo {
    pub headline: Option<String>,
    /// Rows of the main block, cells joined with ` | `.
    pub entries: Vec<String>,
    /// First cell of each row in the secondary block.
    pub additional: Vec<String>,
}

/// Slice from the element carrying `id="<id>"` up to `end` (or the end of input).
fn block_by_id<'a>(html: &'a str, id: &str, end: Option<&str>) -> Option<&'a str> {
    let start = html.find(&format!("id=\"{id}\""))?;
    let rest = &html[start..];
    let stop = end.and_then(|e| rest.find(e)).unwrap_or(rest.len());
    Some(&rest[..stop])
}

pub fn parse_extrainfo_page(html: &str) -> ExtraInfo {
    let headline = PAGE_HEADER
        .captures(html)
        .map(|c| clean_text(&c[1]))
        .filter(|h| !h.is_empty());

    let entries = block_by_id(html, "div_1", Some("id=\"div_2\""))
        .map(|block| {
            rows(block)
                .into_iter()
                .map(|cells| cells.into_iter().filter(|c| !c.is_empty()).collect::<Vec<_>>())
                .filter(|cells| !cells.is_empty())
                .map(|cells| cells.join(" | "))
                .collect()
        })
        .unwrap_or_default();

    let additional = block_by_id(html, "div_2", None)
        .and_then(|block| Some(table_body(block, TABLE_OPEN.find(block)?.end())))
        .map(|block| {
            rows(block)
                .into_iter()
                .filter_map(|cells| cells.into_iter().next())
                .filter(|c| !c.is_empty())
                .collect()
        })
        .unwrap_or_default();

    ExtraInfo {
        headline,
        entries,
        additional,
    }
}
