use crate::error::{ExtractError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: Option<u32>,
}

impl PageRange {
    /// Parse a single token like "5" or "1-5"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ExtractError::parse(s, "empty page range"));
        }

        if let Some(dash_pos) = s.find('-') {
            // "-5" is a missing start, not a negative page
            if dash_pos == 0 {
                return Err(ExtractError::parse(s, "missing start page"));
            }

            let start = parse_page_number(s, &s[..dash_pos])?;
            let end = parse_page_number(s, &s[dash_pos + 1..])?;

            if start > end {
                return Err(ExtractError::parse(
                    s,
                    format!("start page {} is after end page {}", start, end),
                ));
            }

            Ok(PageRange {
                start,
                end: Some(end),
            })
        } else {
            let page = parse_page_number(s, s)?;
            Ok(PageRange {
                start: page,
                end: None,
            })
        }
    }

}

fn parse_page_number(token: &str, s: &str) -> Result<u32> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ExtractError::parse(token, "missing page number"));
    }
    s.parse::<u32>()
        .map_err(|_| ExtractError::parse(token, format!("invalid page number '{}'", s)))
}

/// Requested pages, kept as sorted, disjoint, non-adjacent inclusive ranges.
/// Page 0 parses but never resolves to a real page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet {
    ranges: Vec<(u32, u32)>,
}

/// A page set split against the page count of an actual document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPages {
    pub pages: Vec<u32>,
    pub skipped: PageSet,
}

impl PageSet {
    pub fn from_ranges<I: IntoIterator<Item = (u32, u32)>>(ranges: I) -> Self {
        let mut sorted: Vec<(u32, u32)> = ranges.into_iter().filter(|(s, e)| s <= e).collect();
        sorted.sort_unstable();

        let mut merged: Vec<(u32, u32)> = Vec::with_capacity(sorted.len());
        for (start, end) in sorted {
            match merged.last_mut() {
                Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }
        PageSet { ranges: merged }
    }

    pub fn from_pages<I: IntoIterator<Item = u32>>(pages: I) -> Self {
        Self::from_ranges(pages.into_iter().map(|p| (p, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of pages named, without expanding the ranges
    pub fn len(&self) -> u64 {
        self.ranges
            .iter()
            .map(|&(s, e)| u64::from(e - s) + 1)
            .sum()
    }

    /// Split into pages within `1..=total_pages` and everything else.
    /// Only the in-range part is expanded.
    pub fn resolve(&self, total_pages: u32) -> ResolvedPages {
        let mut pages = Vec::new();
        let mut skipped = Vec::new();

        for &(start, end) in &self.ranges {
            if start == 0 {
                skipped.push((0, 0));
            }
            let lo = start.max(1);
            let hi = end.min(total_pages);
            if lo <= hi {
                pages.extend(lo..=hi);
            }
            if let Some(first_over) = total_pages.checked_add(1) {
                if end >= first_over {
                    skipped.push((start.max(first_over), end));
                }
            }
        }

        ResolvedPages {
            pages,
            skipped: PageSet::from_ranges(skipped),
        }
    }
}

impl fmt::Display for PageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(start, end)) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if start == end {
                write!(f, "{}", start)?;
            } else {
                write!(f, "{}-{}", start, end)?;
            }
        }
        Ok(())
    }
}

impl Serialize for PageSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a comma-separated list of page ranges like "1-3,7,10-12"
pub fn parse_page_ranges(s: &str) -> Result<Vec<PageRange>> {
    s.split(',').map(PageRange::parse).collect()
}

/// Parse a page range string into the set of pages it names
pub fn parse_page_set(s: &str) -> Result<PageSet> {
    let ranges = parse_page_ranges(s)?;
    Ok(PageSet::from_ranges(
        ranges.iter().map(|r| (r.start, r.end.unwrap_or(r.start))),
    ))
}
