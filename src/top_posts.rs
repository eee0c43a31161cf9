use crate::types::{Comment, Post};
use serde::Serialize;
use std::collections::HashMap;

/// A post annotated with its comment count, for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopPost {
    pub post_id: u32,
    pub post_title: String,
    pub post_body: String,
    pub total_number_of_comments: u32,
}

/// Annotate every post with the number of comments referencing it and rank by
/// descending count. Posts without comments appear with a count of zero; the
/// stable sort keeps equal-count posts in their fetched order.
pub fn rank_posts_by_comments(posts: &[Post], comments: &[Comment]) -> Vec<TopPost> {
    let mut counts: HashMap<u32, u32> = HashMap::new();
    for comment in comments {
        *counts.entry(comment.post_id).or_insert(0) += 1;
    }

    let mut ranked: Vec<TopPost> = posts
        .iter()
        .map(|post| TopPost {
            post_id: post.id,
            post_title: post.title.clone(),
            post_body: post.body.clone(),
            total_number_of_comments: counts.get(&post.id).copied().unwrap_or(0),
        })
        .collect();

    ranked.sort_by(|a, b| b.total_number_of_comments.cmp(&a.total_number_of_comments));

    ranked
}
