//! Sample posts loaded into the repositories when seeding is enabled.

use time::{OffsetDateTime, macros::datetime};

use crate::domain::{
    entities::{ImageAttachment, PostRecord},
    types::{Category, PostStatus},
};

const CARD_IMAGE: &str = "/placeholder.svg?height=400&width=400";

struct Seed {
    id: u64,
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    author: &'static str,
    category: Category,
    tags: &'static [&'static str],
    status: PostStatus,
    created_at: OffsetDateTime,
    filter: Option<&'static str>,
    featured: bool,
    read_time_minutes: u32,
    likes: u64,
    comments: u64,
}

const SEEDS: [Seed; 9] = [
    Seed {
        id: 1,
        title: "Getting Started with Next.js 14",
        excerpt: "Learn the latest features and improvements in Next.js 14, including Server Components, improved routing, and performance optimizations.",
        content: "# Getting Started with Next.js 14\n\nNext.js 14 makes Server Components the default and refines the App Router.\n\n## Getting Started\n\n```bash\nnpx create-next-app@latest my-app\ncd my-app\nnpm run dev\n```\n\n## Best Practices\n\n1. **Use Server Components by default**\n2. **Optimize images** with the Image component\n3. **Implement proper caching**\n",
        author: "John Doe",
        category: Category::WebDevelopment,
        tags: &["nextjs", "react", "web-development"],
        status: PostStatus::Published,
        created_at: datetime!(2024-01-15 0:00 UTC),
        filter: Some("Bright"),
        featured: true,
        read_time_minutes: 5,
        likes: 124,
        comments: 18,
    },
    Seed {
        id: 2,
        title: "MongoDB Best Practices for 2024",
        excerpt: "Essential MongoDB patterns and practices every developer should know for building scalable applications.",
        content: "# MongoDB Best Practices for 2024\n\n## Schema Design Principles\n\nEmbed data that is read together; reference data that changes independently.\n\n## Indexing Strategy\n\n```javascript\ndb.posts.createIndex({ \"author\": 1, \"publishedAt\": -1 })\n```\n\n## Security\n\nEnable authentication, use role-based access control and TLS.\n",
        author: "Mike Johnson",
        category: Category::Database,
        tags: &["mongodb", "database", "best-practices"],
        status: PostStatus::Published,
        created_at: datetime!(2024-01-10 0:00 UTC),
        filter: Some("Vintage"),
        featured: true,
        read_time_minutes: 8,
        likes: 89,
        comments: 12,
    },
    Seed {
        id: 3,
        title: "React Server Components Deep Dive",
        excerpt: "Understanding React Server Components and how they revolutionize the way we build React applications.",
        content: "# React Server Components Deep Dive\n\nServer Components render on the server and ship no JavaScript to the client.\n\n## When to reach for Client Components\n\nOnly when a component needs state, effects or browser APIs.\n",
        author: "Sarah Wilson",
        category: Category::React,
        tags: &["react", "server-components", "performance"],
        status: PostStatus::Published,
        created_at: datetime!(2024-01-08 0:00 UTC),
        filter: Some("Sepia"),
        featured: false,
        read_time_minutes: 12,
        likes: 156,
        comments: 24,
    },
    Seed {
        id: 4,
        title: "TypeScript Advanced Patterns",
        excerpt: "Explore advanced TypeScript patterns and techniques for building robust, type-safe applications.",
        content: "# TypeScript Advanced Patterns\n\nConditional types, mapped types and template literal types let the compiler carry more of your invariants.\n",
        author: "Alex Chen",
        category: Category::TypeScript,
        tags: &["typescript", "patterns", "advanced"],
        status: PostStatus::Published,
        created_at: datetime!(2024-01-05 0:00 UTC),
        filter: Some("Contrast"),
        featured: false,
        read_time_minutes: 10,
        likes: 203,
        comments: 31,
    },
    Seed {
        id: 5,
        title: "Building Scalable APIs with Node.js",
        excerpt: "Learn how to design and implement scalable REST APIs using Node.js, Express, and modern best practices.",
        content: "# Building Scalable APIs with Node.js\n\nKeep handlers thin, validate at the edge and push slow work onto queues.\n",
        author: "David Kumar",
        category: Category::Backend,
        tags: &["nodejs", "api", "backend", "scalability"],
        status: PostStatus::Published,
        created_at: datetime!(2024-01-03 0:00 UTC),
        filter: Some("Saturate"),
        featured: false,
        read_time_minutes: 15,
        likes: 178,
        comments: 22,
    },
    Seed {
        id: 6,
        title: "CSS Grid vs Flexbox: When to Use What",
        excerpt: "A comprehensive guide to understanding when to use CSS Grid versus Flexbox for your layouts.",
        content: "# CSS Grid vs Flexbox\n\nGrid lays out two dimensions at once; Flexbox distributes space along one axis.\n",
        author: "Emma Rodriguez",
        category: Category::Css,
        tags: &["css", "grid", "flexbox", "layout"],
        status: PostStatus::Published,
        created_at: datetime!(2024-01-01 0:00 UTC),
        filter: Some("Cool"),
        featured: false,
        read_time_minutes: 7,
        likes: 92,
        comments: 15,
    },
    Seed {
        id: 7,
        title: "Understanding React Server Components",
        excerpt: "Deep dive into React Server Components and how they revolutionize React applications",
        content: "# Understanding React Server Components\n\nReact Server Components represent a paradigm shift...",
        author: "Jane Smith",
        category: Category::React,
        tags: &["react", "server-components", "performance"],
        status: PostStatus::Pending,
        created_at: datetime!(2024-01-14 0:00 UTC),
        filter: None,
        featured: false,
        read_time_minutes: 1,
        likes: 0,
        comments: 0,
    },
    Seed {
        id: 8,
        title: "Advanced TypeScript Patterns",
        excerpt: "Explore advanced TypeScript patterns for better code organization",
        content: "# Advanced TypeScript Patterns\n\nTypeScript offers powerful features...",
        author: "Alex Johnson",
        category: Category::TypeScript,
        tags: &["typescript", "patterns", "advanced"],
        status: PostStatus::Pending,
        created_at: datetime!(2024-01-13 0:00 UTC),
        filter: None,
        featured: false,
        read_time_minutes: 1,
        likes: 0,
        comments: 0,
    },
    Seed {
        id: 9,
        title: "Building Scalable APIs",
        excerpt: "Best practices for building APIs that scale",
        content: "# Building Scalable APIs\n\nOutline: pagination, rate limits, idempotency keys.",
        author: "Jane Smith",
        category: Category::Backend,
        tags: &["api", "backend"],
        status: PostStatus::Draft,
        created_at: datetime!(2024-01-13 0:00 UTC),
        filter: None,
        featured: false,
        read_time_minutes: 1,
        likes: 0,
        comments: 0,
    },
];

/// Fresh copies of the sample posts, in id order.
pub fn seed_posts() -> Vec<PostRecord> {
    SEEDS.iter().map(Seed::to_record).collect()
}

impl Seed {
    fn to_record(&self) -> PostRecord {
        let published = self.status == PostStatus::Published;
        PostRecord {
            id: self.id,
            title: self.title.to_string(),
            excerpt: self.excerpt.to_string(),
            content: self.content.to_string(),
            author: self.author.to_string(),
            category: Some(self.category),
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
            status: self.status,
            created_at: self.created_at,
            published_at: published.then_some(self.created_at),
            featured_image: self
                .filter
                .map(|filter| ImageAttachment::new(CARD_IMAGE, Some(filter))),
            content_images: Vec::new(),
            featured: self.featured,
            read_time_minutes: self.read_time_minutes,
            likes: self.likes,
            comments: self.comments,
            review_feedback: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique_and_ordered() {
        let ids: Vec<_> = seed_posts().iter().map(|post| post.id).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn published_at_set_only_for_published_posts() {
        for post in seed_posts() {
            assert_eq!(post.published_at.is_some(), post.is_published(), "post {}", post.id);
        }
    }
}
