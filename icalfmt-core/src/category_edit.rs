//! Category edit lists such as `+holiday,-work,=family`.

use std::fmt;

use tracing::{debug, warn};

use crate::event::Events;
use crate::string_set::CategoryOp;

/// One `<op><tag>` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEdit {
    pub op: CategoryOp,
    pub tag: String,
}

impl CategoryEdit {
    pub fn new(op: CategoryOp, tag: impl Into<String>) -> Self {
        CategoryEdit {
            op,
            tag: tag.into(),
        }
    }
}

impl fmt::Display for CategoryEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.tag)
    }
}

/// Parse a comma-separated edit list.
///
/// Tokens too short to hold an operator and a tag are skipped, as are tokens
/// with an unknown operator.
pub fn parse_category_edits(list: &str) -> Vec<CategoryEdit> {
    let mut edits = Vec::new();

    for (i, token) in list.split(',').map(str::trim).enumerate() {
        let mut chars = token.chars();
        let (Some(symbol), tag) = (chars.next(), chars.as_str()) else {
            debug!(index = i, "ignoring empty category change");
            continue;
        };
        if tag.is_empty() {
            debug!(index = i, "ignoring empty category change");
            continue;
        }

        match CategoryOp::from_symbol(symbol) {
            Some(op) => edits.push(CategoryEdit::new(op, tag)),
            None => warn!(index = i, operation = %symbol, "unknown category operation"),
        }
    }

    edits
}

/// Apply edits in order to every event.
pub fn apply_category_edits(events: &mut Events, edits: &[CategoryEdit]) {
    for edit in edits {
        debug!(edit = %edit, "applying category edit");
        events.op_categories(edit.op, std::slice::from_ref(&edit.tag));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_edit_list() {
        let edits = parse_category_edits("+holiday, -work ,=family");
        assert_eq!(
            edits,
            vec![
                CategoryEdit::new(CategoryOp::Union, "holiday"),
                CategoryEdit::new(CategoryOp::Subtract, "work"),
                CategoryEdit::new(CategoryOp::Intersect, "family"),
            ]
        );
    }

    #[test]
    fn test_parse_skips_short_and_unknown_tokens() {
        let edits = parse_category_edits("+,,-, *x,+ok");
        assert_eq!(edits, vec![CategoryEdit::new(CategoryOp::Union, "ok")]);
        assert!(parse_category_edits("").is_empty());
    }

    #[test]
    fn test_edit_display() {
        assert_eq!(CategoryEdit::new(CategoryOp::Subtract, "work").to_string(), "-work");
    }

    #[test]
    fn test_apply_in_order() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut event = Event::new(start);
        event.categories = ["work", "home"].into_iter().collect();
        let mut events: Events = vec![event].into();

        apply_category_edits(&mut events, &parse_category_edits("+family,-work,=family"));
        assert_eq!(events[0].categories.as_slice(), ["family".to_string()]);
    }
}
