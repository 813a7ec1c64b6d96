//! Shared fixtures for collection adapter tests.

#![allow(dead_code)]

use mockwell_db::Backing;

#[derive(Debug, Clone, PartialEq)]
pub struct Blog {
    pub blog_id: i32,
    pub url: String,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub post_id: i32,
    pub title: String,
}

impl Blog {
    pub fn new(blog_id: i32) -> Self {
        Self {
            blog_id,
            url: format!("https://blogs.example/{}", blog_id),
            posts: Vec::new(),
        }
    }
}

pub fn seeded(ids: &[i32]) -> Backing<Blog> {
    ids.iter().copied().map(Blog::new).collect()
}
