#![allow(missing_docs)]

pub(crate) mod fixtures;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use fixtures::{make_transaction, seed_category_list, seed_transactions};
pub(crate) use html::{assert_valid_html, parse_html_document, select_text};
pub(crate) use http::{assert_content_type, assert_status_ok};
