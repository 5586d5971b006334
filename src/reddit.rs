use std::fmt;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use clap::ValueEnum;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use spdlog::debug;

use crate::config::Credentials;
use crate::error::FetchError;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
// Reddit caps a single listing page at 100 entries
const MAX_LISTING_LIMIT: u32 = 100;

pub struct Post {
    pub title: String,
    pub selftext: String,
    pub url: String,
    pub score: i64,
    pub pinned: bool,
    pub comments: Vec<Comment>,
}

pub struct Comment {
    pub body: String,
    pub url: String,
    pub score: i64,
}

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
pub enum SortMode {
    Hot,
    New,
    Top,
    Rising,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Hot => "hot",
            SortMode::New => "new",
            SortMode::Top => "top",
            SortMode::Rising => "rising",
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct Listing<T> {
    data: ListingData<T>,
}

#[derive(Deserialize)]
struct ListingData<T> {
    children: Vec<Child<T>>,
}

#[derive(Deserialize)]
struct Child<T> {
    #[serde(default)]
    kind: String,
    data: T,
}

#[derive(Deserialize, Default)]
struct RawPost {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    stickied: bool,
}

#[derive(Deserialize, Default)]
struct RawComment {
    #[serde(default)]
    body: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    score: i64,
}

pub struct RedditClient {
    http: Client,
    token: String,
    user_agent: String,
}

impl RedditClient {
    /// Exchanges the app credentials for an application-only bearer token.
    pub fn connect(creds: &Credentials, user_agent: &str) -> Result<RedditClient, FetchError> {
        let http = Client::builder().timeout(HTTP_TIMEOUT).build()?;

        let response = http
            .post(TOKEN_URL)
            .basic_auth(&creds.reddit_client_id, Some(&creds.reddit_client_secret))
            .header(USER_AGENT, user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Auth(format!(
                "token request returned {}",
                status
            )));
        }
        let token: TokenResponse = response.json()?;

        Ok(RedditClient {
            http,
            token: token.access_token,
            user_agent: user_agent.to_string(),
        })
    }

    /// Returns at most `num_posts` posts from the subreddit, in the order the
    /// listing endpoint ranks them, each with its top-level comments attached.
    pub fn fetch_posts(
        &self,
        subreddit: &str,
        num_posts: u32,
        sort: SortMode,
        skip_pinned: bool,
        num_comments: u32,
    ) -> Result<Vec<Post>, FetchError> {
        // Pinned posts are only known after inspection, so over-fetch when
        // they are going to be skipped
        let fetch_limit = if skip_pinned { num_posts * 3 } else { num_posts };
        let fetch_limit = fetch_limit.min(MAX_LISTING_LIMIT);

        let url = format!("{}/r/{}/{}.json", API_BASE, subreddit, sort.as_str());
        let listing: Listing<RawPost> = self.get_json(
            &url,
            &[
                ("limit", fetch_limit.to_string()),
                ("raw_json", "1".to_string()),
            ],
        )?;

        let raw_posts: Vec<RawPost> = listing.data.children.into_iter().map(|c| c.data).collect();
        let selected = select_posts(raw_posts, num_posts as usize, skip_pinned);

        let mut posts = Vec::with_capacity(selected.len());
        for raw in selected {
            let comments = self.fetch_comments(&raw.id, num_comments)?;
            debug!("Fetched post '{}' with {} comments", raw.title, comments.len());
            posts.push(Post {
                title: raw.title,
                selftext: raw.selftext,
                url: raw.url,
                score: raw.score,
                pinned: raw.stickied,
                comments,
            });
        }
        Ok(posts)
    }

    fn fetch_comments(&self, post_id: &str, num_comments: u32) -> Result<Vec<Comment>, FetchError> {
        let url = format!("{}/comments/{}.json", API_BASE, post_id);
        // The endpoint returns a pair of listings: the post itself, then its
        // flattened top-level comments
        let pages: Vec<Listing<RawComment>> = self.get_json(
            &url,
            &[
                ("limit", num_comments.to_string()),
                ("depth", "1".to_string()),
                ("raw_json", "1".to_string()),
            ],
        )?;

        let comment_listing = match pages.into_iter().nth(1) {
            Some(listing) => listing,
            None => return Ok(vec![]),
        };

        Ok(collect_comments(comment_listing, num_comments as usize))
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(USER_AGENT, self.user_agent.as_str())
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json()?)
    }
}

fn select_posts(children: Vec<RawPost>, num_posts: usize, skip_pinned: bool) -> Vec<RawPost> {
    let mut selected = Vec::with_capacity(num_posts);
    for raw in children {
        if selected.len() >= num_posts {
            break;
        }
        if skip_pinned && raw.stickied {
            debug!("Skipping pinned post '{}'", raw.title);
            continue;
        }
        selected.push(raw);
    }
    selected
}

fn collect_comments(listing: Listing<RawComment>, num_comments: usize) -> Vec<Comment> {
    let mut comments = vec![];
    for child in listing.data.children {
        if comments.len() >= num_comments {
            break;
        }
        // "more" stubs share the listing with real t1 comments
        if child.kind != "t1" {
            continue;
        }
        comments.push(Comment {
            body: child.data.body,
            url: format!("https://www.reddit.com{}", child.data.permalink),
            score: child.data.score,
        });
    }
    comments
}

#[cfg(test)]
mod tests {
    use crate::test_data::{COMMENTS_JSON, POSTS_LISTING_JSON};

    use super::*;

    fn raw_post(title: &str, stickied: bool) -> RawPost {
        RawPost {
            id: title.to_string(),
            title: title.to_string(),
            stickied,
            ..RawPost::default()
        }
    }

    #[test]
    fn test_parse_listing() {
        let listing: Listing<RawPost> = serde_json::from_str(POSTS_LISTING_JSON).unwrap();
        let posts: Vec<RawPost> = listing.data.children.into_iter().map(|c| c.data).collect();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].title, "Weekly Earnings Thread");
        assert!(posts[0].stickied);
        assert_eq!(posts[1].title, "GME to the moon");
        assert_eq!(posts[1].score, 4200);
        assert!(!posts[1].stickied);
    }

    #[test]
    fn test_parse_comments_skips_more_stubs() {
        let pages: Vec<Listing<RawComment>> = serde_json::from_str(COMMENTS_JSON).unwrap();
        let listing = pages.into_iter().nth(1).unwrap();
        let comments = collect_comments(listing, 20);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].body, "Hold the line");
        assert_eq!(
            comments[0].url,
            "https://www.reddit.com/r/wallstreetbets/comments/abc123/c1/"
        );
        assert_eq!(comments[1].score, 12);
    }

    #[test]
    fn test_parse_comments_caps_count() {
        let pages: Vec<Listing<RawComment>> = serde_json::from_str(COMMENTS_JSON).unwrap();
        let listing = pages.into_iter().nth(1).unwrap();
        let comments = collect_comments(listing, 1);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "Hold the line");
    }

    #[test]
    fn test_select_posts_skip_pinned() {
        let children = vec![
            raw_post("pinned-1", true),
            raw_post("a", false),
            raw_post("pinned-2", true),
            raw_post("b", false),
            raw_post("c", false),
            raw_post("d", false),
        ];
        let selected = select_posts(children, 3, true);
        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|p| !p.stickied));
        let titles: Vec<&str> = selected.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[test]
    fn test_select_posts_keeps_pinned_by_default() {
        let children = vec![
            raw_post("pinned-1", true),
            raw_post("a", false),
            raw_post("b", false),
        ];
        let selected = select_posts(children, 2, false);
        let titles: Vec<&str> = selected.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["pinned-1", "a"]);
    }

    #[test]
    fn test_select_posts_short_listing() {
        let children = vec![raw_post("a", false)];
        let selected = select_posts(children, 5, true);
        assert_eq!(selected.len(), 1);
    }
}
