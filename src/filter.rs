// src/filter.rs

use crate::error::{MindtickError, Result};
use crate::models::{Range, Tag};

/// A resolved `view` filter. `tag == None` matches every tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filter {
    pub tag: Option<Tag>,
    pub range: Range,
}

/// Resolves `view` tokens into a [`Filter`].
///
/// Tag keywords win over range keywords, tokens may come in either order,
/// and each kind may be given at most once.
pub fn compose<S: AsRef<str>>(tokens: &[S]) -> Result<Filter> {
    let mut filter = Filter::default();
    let mut range_set = false;

    for token in tokens {
        let token = token.as_ref();
        if let Some(tag) = Tag::parse(token) {
            if filter.tag.is_some() {
                return Err(MindtickError::DuplicateFilter(token.to_string()));
            }
            filter.tag = Some(tag);
        } else if let Some(range) = Range::parse(token) {
            if range_set {
                return Err(MindtickError::DuplicateFilter(token.to_string()));
            }
            filter.range = range;
            range_set = true;
        } else {
            return Err(MindtickError::UnknownFilter(token.to_string()));
        }
    }

    Ok(filter)
}
