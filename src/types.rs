use serde::{Deserialize, Serialize};

/// A post as served by the upstream content API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u32,
    #[serde(rename = "userId")]
    pub user_id: u32,
    pub title: String,
    pub body: String,
}

/// A comment as served by the upstream content API. `post_id` references the
/// parent post but is not enforced locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u32,
    #[serde(rename = "postId")]
    pub post_id: u32,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_decodes_upstream_field_names() {
        let json = r#"{
            "postId": 1,
            "id": 3,
            "name": "odio adipisci rerum aut animi",
            "email": "Nikita@garfield.biz",
            "body": "quia molestiae reprehenderit quasi aspernatur"
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.post_id, 1);
        assert_eq!(comment.id, 3);
        assert_eq!(comment.email, "Nikita@garfield.biz");
    }

    #[test]
    fn post_decodes_upstream_field_names() {
        let json = r#"{"userId": 7, "id": 62, "title": "t", "body": "b"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.user_id, 7);
        assert_eq!(post.id, 62);
    }
}
