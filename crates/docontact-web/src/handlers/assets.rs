//! Browser-side controllers for the form and the admin table.
//!
//! Both mirror server behaviour for responsiveness only; the server repeats
//! every check.

use axum::{http::header, response::IntoResponse};

const FORM_JS: &str = include_str!("../../assets/form.js");
const ADMIN_JS: &str = include_str!("../../assets/admin.js");

const JS: &str = "application/javascript; charset=utf-8";

pub async fn form_js() -> impl IntoResponse { ([(header::CONTENT_TYPE, JS)], FORM_JS) }

pub async fn admin_js() -> impl IntoResponse { ([(header::CONTENT_TYPE, JS)], ADMIN_JS) }
