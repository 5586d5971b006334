use crate::reddit::Post;

/// Concatenates the fetched posts into the single text blob handed to the
/// summarizer. Pure function of its input: the same posts always produce the
/// same bytes.
pub fn aggregate_posts(posts: &[Post]) -> String {
    let mut content = String::new();

    for (i, post) in posts.iter().enumerate() {
        // Pinned posts are marked so the model can treat them differently
        let pinned_marker = if post.pinned { "[PINNED] " } else { "" };
        content.push_str(&format!(
            "--- Post {}: {}{} ---\n",
            i + 1,
            pinned_marker,
            post.title
        ));
        content.push_str(&format!("Source URL: {}\n", post.url));

        if !post.selftext.trim().is_empty() {
            content.push_str(&post.selftext);
            content.push('\n');
        }

        if !post.comments.is_empty() {
            content.push_str("Top Comments:\n");
            for comment in &post.comments {
                if !keep_comment(&comment.body) {
                    continue;
                }
                content.push_str(&format!("- {}", comment.body));
                if !comment.url.is_empty() {
                    content.push_str(&format!(" (Source: {})", comment.url));
                }
                content.push('\n');
            }
        }
        content.push('\n');
    }

    content
}

/// Moderation tombstones and blank bodies add nothing to the prompt.
pub fn keep_comment(body: &str) -> bool {
    !body.trim().is_empty() && !body.starts_with("[deleted]") && !body.starts_with("[removed]")
}
