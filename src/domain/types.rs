//! Shared domain enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Pending,
    Published,
    Rejected,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Published => "published",
            PostStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed set of post categories. Serialised by display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "React")]
    React,
    #[serde(rename = "Next.js")]
    NextJs,
    #[serde(rename = "Database")]
    Database,
    #[serde(rename = "TypeScript")]
    TypeScript,
    #[serde(rename = "Backend")]
    Backend,
    #[serde(rename = "CSS")]
    Css,
    #[serde(rename = "DevOps")]
    DevOps,
    #[serde(rename = "Mobile Development")]
    Mobile,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::WebDevelopment,
        Category::React,
        Category::NextJs,
        Category::Database,
        Category::TypeScript,
        Category::Backend,
        Category::Css,
        Category::DevOps,
        Category::Mobile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::WebDevelopment => "Web Development",
            Category::React => "React",
            Category::NextJs => "Next.js",
            Category::Database => "Database",
            Category::TypeScript => "TypeScript",
            Category::Backend => "Backend",
            Category::Css => "CSS",
            Category::DevOps => "DevOps",
            Category::Mobile => "Mobile Development",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Category::WebDevelopment => "web-development",
            Category::React => "react",
            Category::NextJs => "nextjs",
            Category::Database => "database",
            Category::TypeScript => "typescript",
            Category::Backend => "backend",
            Category::Css => "css",
            Category::DevOps => "devops",
            Category::Mobile => "mobile",
        }
    }

    /// Exact display-label lookup, as used by feed filtering.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == value)
    }

    /// Composer input: accepts a display label or a slug.
    pub fn parse(value: &str) -> Option<Self> {
        Self::from_label(value)
            .or_else(|| Self::ALL.into_iter().find(|category| category.slug() == value))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Author,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Author => "author",
        }
    }
}
