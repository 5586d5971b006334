#[cfg(test)]
pub const LETTER_MD: &str = "**Subject:** Bulls On Parade

**Date:** February 01, 2026 at 02:45 PM EST

## Market Overview

The market ripped higher today and the sub noticed.
GME closed up double digits while SPY drifted sideways.

## Tickers In Play

| Ticker | Sentiment |
| --- | --- |
| GME | Bullish |
| SPY | Mixed |

## Closing Thoughts

Position sizing remains a rumor around here.
";

#[cfg(test)]
pub const POSTS_LISTING_JSON: &str = r##"{
  "kind": "Listing",
  "data": {
    "children": [
      {
        "kind": "t3",
        "data": {
          "id": "aaa111",
          "title": "Weekly Earnings Thread",
          "selftext": "Discuss earnings here",
          "url": "https://www.reddit.com/r/wallstreetbets/comments/aaa111/",
          "score": 812,
          "stickied": true
        }
      },
      {
        "kind": "t3",
        "data": {
          "id": "abc123",
          "title": "GME to the moon",
          "selftext": "Diamond hands",
          "url": "https://www.reddit.com/r/wallstreetbets/comments/abc123/",
          "score": 4200,
          "stickied": false
        }
      },
      {
        "kind": "t3",
        "data": {
          "id": "def456",
          "title": "SPY puts printing",
          "selftext": "",
          "url": "https://i.redd.it/chart.png",
          "score": 950,
          "stickied": false
        }
      }
    ]
  }
}"##;

#[cfg(test)]
pub const COMMENTS_JSON: &str = r##"[
  {
    "kind": "Listing",
    "data": {
      "children": [
        {
          "kind": "t3",
          "data": {
            "id": "abc123",
            "title": "GME to the moon"
          }
        }
      ]
    }
  },
  {
    "kind": "Listing",
    "data": {
      "children": [
        {
          "kind": "t1",
          "data": {
            "body": "Hold the line",
            "permalink": "/r/wallstreetbets/comments/abc123/c1/",
            "score": 57
          }
        },
        {
          "kind": "t1",
          "data": {
            "body": "This is the way",
            "permalink": "/r/wallstreetbets/comments/abc123/c2/",
            "score": 12
          }
        },
        {
          "kind": "more",
          "data": {
            "count": 118,
            "children": []
          }
        }
      ]
    }
  }
]"##;

#[cfg(test)]
pub const GEMINI_RESPONSE_JSON: &str = r##"{
  "candidates": [
    {
      "content": {
        "parts": [
          {
            "text": "**Subject:** Bulls On Parade\n\n"
          },
          {
            "text": "Markets rallied today."
          }
        ],
        "role": "model"
      },
      "finishReason": "STOP"
    }
  ]
}"##;
