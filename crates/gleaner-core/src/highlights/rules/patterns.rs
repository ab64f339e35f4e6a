//! Common regex patterns for highlight text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Any run of whitespace, newlines and tabs included
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
