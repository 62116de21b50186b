//! HTML for the contact form and the admin submissions table.
//!
//! Every interpolated value goes through [`esc`].

use std::{borrow::Cow, fmt::Write as _};

use docontact_core::{
  page::SubmissionPage,
  submission::{ServiceOption, Submission},
};

fn esc(raw: &str) -> Cow<'_, str> { quick_xml::escape::escape(raw) }

// ─── Contact form ────────────────────────────────────────────────────────────

/// The public contact form, carrying a submit-scoped token in the
/// `docontact_nonce` field.
pub fn form_page(submit_token: &str, home_url: &str) -> String {
  let mut options = String::from("<option value=\"\">-- Select Service --</option>");
  for opt in ServiceOption::all() {
    let _ = write!(options, "<option value=\"{}\">{}</option>", opt.key(), esc(opt.label()));
  }

  format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Contact us</title>
</head>
<body>
<div class="docontact-wrap">
  <div id="docontact-messages" aria-live="polite"></div>
  <form id="docontact-form" method="post" action="/contact" data-home-url="{home_url}" novalidate>
    <p>
      <label for="doc_full_name">Full Name <span class="required">*</span></label><br>
      <input type="text" id="doc_full_name" name="full_name" pattern="[A-Za-z ]+" placeholder="Please enter your full name (Only letters and spaces are allowed)" required>
      <span class="doc-field-error" id="doc_full_name_error" role="alert"></span>
    </p>
    <p>
      <label for="doc_email">Email <span class="required">*</span></label><br>
      <input type="email" id="doc_email" name="email" placeholder="Please enter your email (example@example.com)" required>
      <span class="doc-field-error" id="doc_email_error" role="alert"></span>
    </p>
    <p>
      <label for="doc_phone">Phone Number <span class="required">*</span></label><br>
      <input type="tel" id="doc_phone" name="phone" pattern="[0-9]{{10}}" maxlength="10" inputmode="numeric" placeholder="Please enter your mobile number (10 digits)" required>
      <span class="doc-field-error" id="doc_phone_error" role="alert"></span>
    </p>
    <p>
      <label for="doc_service">Service Required</label><br>
      <select id="doc_service" name="service">{options}</select>
    </p>
    <p>
      <label for="doc_message">Message</label><br>
      <textarea id="doc_message" name="message" placeholder="Please enter your message" rows="5"></textarea>
    </p>
    <p>
      <button type="submit" id="doc_submit" class="doc-button">Submit Message</button>
      <span class="doc-loading" id="doc-loading" aria-hidden="true" hidden></span>
    </p>
    <input type="hidden" name="docontact_nonce" value="{token}">
  </form>
</div>
<script src="/assets/form.js"></script>
</body>
</html>
"#,
    home_url = esc(home_url),
    token = esc(submit_token),
  )
}

// ─── Admin list ──────────────────────────────────────────────────────────────

/// The admin submissions page.
///
/// `raw_query` is the request's query string; page links keep every
/// parameter except `paged`.
pub fn admin_page(page: &SubmissionPage, delete_token: &str, raw_query: Option<&str>) -> String {
  let pagination = &page.pagination;
  let total_pages = pagination.total_pages();

  let mut rows = String::new();
  if page.items.is_empty() {
    rows.push_str("<tr><td colspan=\"10\">No submissions found.</td></tr>");
  }
  for item in &page.items {
    rows.push_str(&admin_row(item));
  }

  let mut links = String::new();
  if total_pages > 1 {
    links.push_str("<div class=\"tablenav\"><div class=\"tablenav-pages\">");
    for n in 1..=total_pages {
      if n == pagination.page {
        let _ = write!(links, "<span class=\"page-numbers current\">{n}</span> ");
      } else {
        let _ = write!(
          links,
          "<a class=\"page-numbers\" href=\"{}\">{n}</a> ",
          esc(&page_href(raw_query, n)),
        );
      }
    }
    links.push_str("</div></div>");
  }

  format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>DoContact Submissions</title>
</head>
<body>
<div class="wrap" id="docontact-admin" data-nonce="{token}" data-delete-url="/admin/submissions/delete" data-bulk-url="/admin/submissions/bulk-delete">
  <h1>DoContact Submissions</h1>
  <p>Total submissions: {total}</p>
  <div class="tablenav top">
    <select id="bulk-action-selector-top">
      <option value="-1">Bulk actions</option>
      <option value="delete">Delete</option>
    </select>
    <button type="button" id="doaction" class="button action" disabled>Apply</button>
  </div>
  <table class="widefat fixed striped">
    <thead>
      <tr>
        <td class="check-column"><input type="checkbox" id="cb-select-all"></td>
        <th>ID</th>
        <th>Full Name</th>
        <th>Email</th>
        <th>Phone</th>
        <th>Service</th>
        <th>Message</th>
        <th>IP</th>
        <th>Submitted (UTC)</th>
        <th>Actions</th>
      </tr>
    </thead>
    <tbody>{rows}</tbody>
  </table>
  {links}
</div>
<script src="/assets/admin.js"></script>
</body>
</html>
"#,
    token = esc(delete_token),
    total = pagination.total,
  )
}

fn admin_row(item: &Submission) -> String {
  let service = item
    .service
    .as_deref()
    .map(ServiceOption::display_stored)
    .unwrap_or_default();
  let name = esc(&item.full_name);
  let email = esc(&item.email);

  format!(
    "<tr data-id=\"{id}\">\
<th class=\"check-column\"><input type=\"checkbox\" class=\"docontact-checkbox\" value=\"{id}\"></th>\
<td>{id}</td>\
<td>{name}</td>\
<td><a href=\"mailto:{email}\">{email}</a></td>\
<td>{phone}</td>\
<td>{service}</td>\
<td><div style=\"white-space:pre-wrap;\">{message}</div></td>\
<td>{ip}</td>\
<td>{created}</td>\
<td><button type=\"button\" class=\"button docontact-delete-btn\" data-id=\"{id}\" data-name=\"{name}\">Delete</button></td>\
</tr>",
    id = item.id,
    phone = esc(&item.phone),
    service = esc(&service),
    message = esc(item.message.as_deref().unwrap_or_default()),
    ip = esc(item.ip_address.as_deref().unwrap_or_default()),
    created = item.created_at.format("%Y-%m-%d %H:%M:%S"),
  )
}

/// `?<other params>&paged=<n>`
pub fn page_href(raw_query: Option<&str>, page: u64) -> String {
  let kept: Vec<&str> = raw_query
    .unwrap_or_default()
    .split('&')
    .filter(|pair| !pair.is_empty())
    .filter(|pair| pair.split('=').next() != Some("paged"))
    .collect();

  if kept.is_empty() {
    format!("?paged={page}")
  } else {
    format!("?{}&paged={page}", kept.join("&"))
  }
}
