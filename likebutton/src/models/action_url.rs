use std::fmt;
use std::str::FromStr;

use crate::errors::LikeButtonError;
use crate::models::action::Action;

/// Structured form of a button's `data-url`.
///
/// The action segment is located once at parse time, so rewriting it never depends on the
/// position of the segment inside the path. Both `/posts/42/like` and `/posts/like/42` shapes are
/// supported: the last path segment spelled `like` or `unlike` is the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionUrl {
    segments: Vec<String>,
    action_idx: usize,
    action: Action,
    // query string and/or fragment, including the leading `?` or `#`
    suffix: String,
}

impl ActionUrl {
    pub fn parse(raw: &str) -> Result<Self, LikeButtonError> {
        let (path, suffix) = match raw.find(['?', '#']) {
            Some(idx) => raw.split_at(idx),
            None => (raw, ""),
        };

        let segments: Vec<String> = path.split('/').map(str::to_string).collect();

        let (action_idx, action) = segments
            .iter()
            .enumerate()
            .rev()
            .find_map(|(idx, segment)| Action::from_str(segment).ok().map(|action| (idx, action)))
            .ok_or_else(|| LikeButtonError::InvalidActionUrl(raw.to_string()))?;

        Ok(Self {
            segments,
            action_idx,
            action,
            suffix: suffix.to_string(),
        })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn with_action(&self, action: Action) -> Self {
        let mut segments = self.segments.clone();
        segments[self.action_idx] = action.to_string();

        Self {
            segments,
            action_idx: self.action_idx,
            action,
            suffix: self.suffix.clone(),
        }
    }
}

impl FromStr for ActionUrl {
    type Err = LikeButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ActionUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.segments.join("/"), self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_action_before_item_id() {
        let url = ActionUrl::parse("/posts/like/42").unwrap();

        assert_eq!(url.action(), Action::Like);
        assert_eq!(url.with_action(Action::Unlike).to_string(), "/posts/unlike/42");
    }

    #[test]
    fn rewrites_trailing_action_and_keeps_query() {
        let url = ActionUrl::parse("https://example.com/blog/42/unlike?next=/home#top").unwrap();
        let rewritten = url.with_action(Action::Like);

        assert_eq!(url.action(), Action::Unlike);
        assert_eq!(rewritten.action(), Action::Like);
        assert_eq!(rewritten.to_string(), "https://example.com/blog/42/like?next=/home#top");
    }

    #[test]
    fn picks_last_action_segment() {
        let url = ActionUrl::parse("/like/posts/unlike/7").unwrap();

        assert_eq!(url.action(), Action::Unlike);
        assert_eq!(url.with_action(Action::Like).to_string(), "/like/posts/like/7");
    }

    #[test]
    fn item_id_that_looks_like_an_action_is_not_confused_with_host() {
        let url = ActionUrl::parse("http://like.example.com/p/like/1").unwrap();

        assert_eq!(url.with_action(Action::Unlike).to_string(), "http://like.example.com/p/unlike/1");
    }

    #[test]
    fn rejects_url_without_action_segment() {
        assert!(matches!(
            ActionUrl::parse("/posts/42/"),
            Err(LikeButtonError::InvalidActionUrl(_))
        ));
        assert!(ActionUrl::parse("/posts/Like/42").is_err());
    }

    #[test]
    fn ignores_action_word_inside_query() {
        assert!(ActionUrl::parse("/posts/42?do=like").is_err());
    }
}
