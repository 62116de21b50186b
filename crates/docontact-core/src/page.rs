//! Pagination maths for the admin list.

use serde::Serialize;

use crate::submission::Submission;

/// Rows per admin page.
pub const PAGE_SIZE: u32 = 25;

/// A resolved page position within `total` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
  /// 1-based page number, never below 1.
  pub page:     u64,
  pub per_page: u32,
  pub total:    u64,
}

impl Pagination {
  pub fn new(page: u64, per_page: u32, total: u64) -> Self {
    Self { page: page.max(1), per_page: per_page.max(1), total }
  }

  pub fn offset(&self) -> u64 { (self.page - 1).saturating_mul(u64::from(self.per_page)) }

  /// `ceil(total / per_page)`, with an empty table still counting as one page.
  pub fn total_pages(&self) -> u64 { self.total.div_ceil(u64::from(self.per_page)).max(1) }
}

/// One page of submissions, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPage {
  pub items:      Vec<Submission>,
  pub pagination: Pagination,
}

/// Read a `paged` query value the lenient way: leading integer only,
/// missing or unparsable input means page 1, and anything below 1 is 1.
pub fn parse_page(raw: Option<&str>) -> u64 {
  let Some(raw) = raw.map(str::trim) else { return 1 };
  let (negative, rest) = match raw.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, raw.strip_prefix('+').unwrap_or(raw)),
  };
  let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
  if negative || digits.is_empty() {
    return 1;
  }
  digits.parse::<u64>().unwrap_or(u64::MAX).max(1)
}
