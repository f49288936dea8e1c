pub mod data;

use serde::Serialize;

use crate::domain::{entities::PostRecord, types::Category};

/// Sentinel accepted in place of a category label.
pub const ALL_CATEGORIES: &str = "All";

const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelection {
    #[default]
    All,
    Exactly(Category),
    /// A label outside the fixed set; exact comparison never holds.
    Unmatched,
}

impl CategorySelection {
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            return Self::All;
        }
        Category::from_label(value).map_or(Self::Unmatched, Self::Exactly)
    }

    pub fn matches(&self, category: Option<Category>) -> bool {
        match self {
            Self::All => true,
            Self::Exactly(selected) => category == Some(*selected),
            Self::Unmatched => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Popular,
    /// Any unrecognised key: keep input order.
    Unsorted,
}

impl SortKey {
    pub fn parse(value: &str) -> Self {
        match value {
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            "popular" => Self::Popular,
            _ => Self::Unsorted,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub search: String,
    pub category: CategorySelection,
    pub sort: SortKey,
}

impl PostQuery {
    pub fn new(search: Option<&str>, category: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            search: search.unwrap_or_default().to_string(),
            category: category.map(CategorySelection::parse).unwrap_or_default(),
            sort: sort.map(SortKey::parse).unwrap_or_default(),
        }
    }
}

/// Case-insensitive substring match over title, excerpt and tags.
pub fn matches_search(post: &PostRecord, term: &str) -> bool {
    let needle = term.to_lowercase();
    post.title.to_lowercase().contains(&needle)
        || post.excerpt.to_lowercase().contains(&needle)
        || post
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Filter and order `posts` without touching the input slice.
pub fn query<'a>(posts: &'a [PostRecord], query: &PostQuery) -> Vec<&'a PostRecord> {
    let mut selected: Vec<&PostRecord> = posts
        .iter()
        .filter(|post| matches_search(post, &query.search) && query.category.matches(post.category))
        .collect();

    // `sort_by` is stable, ties keep input order.
    match query.sort {
        SortKey::Newest => selected.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        SortKey::Oldest => selected.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
        SortKey::Popular => selected.sort_by(|a, b| b.likes.cmp(&a.likes)),
        SortKey::Unsorted => {}
    }

    selected
}

/// Other published posts sharing `post`'s category, in input order.
pub fn related<'a>(posts: &'a [PostRecord], post: &PostRecord, limit: usize) -> Vec<&'a PostRecord> {
    posts
        .iter()
        .filter(|candidate| {
            candidate.id != post.id
                && candidate.is_published()
                && candidate.category.is_some()
                && candidate.category == post.category
        })
        .take(limit)
        .collect()
}

pub fn featured(posts: &[PostRecord]) -> Vec<&PostRecord> {
    posts
        .iter()
        .filter(|post| post.featured && post.is_published())
        .collect()
}

pub fn estimate_read_time(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Split a comma-separated tag field, dropping blanks. Duplicates are kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::domain::types::PostStatus;

    fn published() -> Vec<PostRecord> {
        data::seed_posts()
            .into_iter()
            .filter(|post| post.status == PostStatus::Published)
            .collect()
    }

    #[test]
    fn popular_orders_by_likes_descending() {
        let posts = published();
        let likes: Vec<u64> = posts.iter().map(|post| post.likes).collect();
        assert_eq!(likes, [124, 89, 156, 203, 178, 92]);

        let sorted = query(&posts, &PostQuery::new(None, None, Some("popular")));
        let likes: Vec<u64> = sorted.iter().map(|post| post.likes).collect();
        assert_eq!(likes, [203, 178, 156, 124, 92, 89]);
    }

    #[test]
    fn newest_and_oldest_follow_publish_dates() {
        let posts = published();
        let expected = [
            date!(2024 - 01 - 15),
            date!(2024 - 01 - 10),
            date!(2024 - 01 - 08),
            date!(2024 - 01 - 05),
            date!(2024 - 01 - 03),
            date!(2024 - 01 - 01),
        ];

        let newest: Vec<_> = query(&posts, &PostQuery::new(None, None, Some("newest")))
            .iter()
            .map(|post| post.published_at.expect("published").date())
            .collect();
        assert_eq!(newest, expected);

        let mut reversed = expected;
        reversed.reverse();
        let oldest: Vec<_> = query(&posts, &PostQuery::new(None, None, Some("oldest")))
            .iter()
            .map(|post| post.published_at.expect("published").date())
            .collect();
        assert_eq!(oldest, reversed);
    }

    #[test]
    fn unknown_sort_key_keeps_input_order() {
        let posts = published();
        let ids: Vec<_> = query(&posts, &PostQuery::new(None, None, Some("trending")))
            .iter()
            .map(|post| post.id)
            .collect();
        let input: Vec<_> = posts.iter().map(|post| post.id).collect();
        assert_eq!(ids, input);
    }

    #[test]
    fn popular_ties_keep_input_order() {
        let mut posts = published();
        for post in &mut posts {
            post.likes = 10;
        }
        let ids: Vec<_> = query(&posts, &PostQuery::new(None, None, Some("popular")))
            .iter()
            .map(|post| post.id)
            .collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let posts = published();

        let by_title = query(&posts, &PostQuery::new(Some("MONGODB"), None, None));
        assert_eq!(by_title.iter().map(|p| p.id).collect::<Vec<_>>(), [2]);

        let by_tag = query(&posts, &PostQuery::new(Some("flexbox"), None, None));
        assert_eq!(by_tag.iter().map(|p| p.id).collect::<Vec<_>>(), [6]);

        let by_excerpt = query(&posts, &PostQuery::new(Some("type-safe"), None, None));
        assert_eq!(by_excerpt.iter().map(|p| p.id).collect::<Vec<_>>(), [4]);
    }

    #[test]
    fn retained_and_dropped_posts_partition_by_predicate() {
        let posts = published();
        for term in ["", "react", "API", "zzz", "e"] {
            for category in ["All", "React", "Database", "Gardening"] {
                let q = PostQuery::new(Some(term), Some(category), None);
                let kept: Vec<u64> = query(&posts, &q).iter().map(|post| post.id).collect();
                for post in &posts {
                    let passes = matches_search(post, term) && q.category.matches(post.category);
                    assert_eq!(kept.contains(&post.id), passes, "term `{term}` category `{category}`");
                }
            }
        }
    }

    #[test]
    fn category_is_matched_exactly() {
        let posts = published();
        assert!(query(&posts, &PostQuery::new(None, Some("react"), None)).is_empty());
        let react = query(&posts, &PostQuery::new(None, Some("React"), None));
        assert_eq!(react.iter().map(|p| p.id).collect::<Vec<_>>(), [3]);
    }

    #[test]
    fn query_does_not_mutate_input() {
        let posts = published();
        let before = posts.clone();
        let _ = query(&posts, &PostQuery::new(Some("a"), None, Some("popular")));
        assert_eq!(posts, before);
    }

    #[test]
    fn related_skips_self_and_other_categories() {
        let mut posts = published();
        let mut sibling = posts[2].clone();
        sibling.id = 42;
        posts.push(sibling);

        let source = posts[2].clone();
        let related = related(&posts, &source, 2);
        assert_eq!(related.iter().map(|p| p.id).collect::<Vec<_>>(), [42]);
    }

    #[test]
    fn read_time_rounds_up_with_floor_of_one() {
        assert_eq!(estimate_read_time(""), 1);
        assert_eq!(estimate_read_time(&"word ".repeat(200)), 1);
        assert_eq!(estimate_read_time(&"word ".repeat(201)), 2);
    }

    #[test]
    fn tags_split_on_commas() {
        assert_eq!(parse_tags("react, nextjs,, react "), ["react", "nextjs", "react"]);
        assert!(parse_tags("  ").is_empty());
    }
}
