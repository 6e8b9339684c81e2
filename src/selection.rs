//! Page selection for bulk export.

use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Which pages to export, by 1-indexed page number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages as sorted, non-overlapping ranges (1-indexed)
    Pages(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(ranges) => {
                ranges.iter().any(|range| range.contains(&page))
            }
        }
    }

    /// Zero-based indices of the selected pages that exist in a document
    /// of `page_count` pages, in ascending order.
    pub fn indices(&self, page_count: usize) -> Vec<usize> {
        (0..page_count)
            .filter(|&index| {
                u32::try_from(index + 1).map_or(false, |number| self.includes(number))
            })
            .collect()
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start = parse_number(start)?;
                let end = parse_number(end)?;
                check_order(start, end)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start = parse_number(start)?;
                let end = parse_number(end)?;
                check_order(start, end)?;
                ranges.push(start..=end);
            } else {
                let page = parse_number(part)?;
                ranges.push(page..=page);
            }
        }

        Ok(PageSelection::Pages(merge_ranges(ranges)))
    }
}

/// Sort ranges and join the ones that overlap or touch.
fn merge_ranges(mut ranges: Vec<RangeInclusive<u32>>) -> Vec<RangeInclusive<u32>> {
    ranges.sort_unstable_by_key(|range| *range.start());

    let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

fn parse_number(s: &str) -> Result<u32> {
    let s = s.trim();
    match s.parse::<u32>() {
        Ok(0) => Err(Error::InvalidPageRange(
            "page numbers start at 1".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(_) => Err(Error::InvalidPageRange(format!(
            "'{}' is not a page number",
            s
        ))),
    }
}

fn check_order(start: u32, end: u32) -> Result<()> {
    if start > end {
        return Err(Error::InvalidPageRange(format!(
            "{}-{} ends before it starts",
            start, end
        )));
    }
    Ok(())
}
